//! Storage engine abstraction and the RocksDB implementation.
//!
//! All direct engine interaction lives here; the facade above only talks to
//! the `StorageBackend` trait.

pub mod init;
pub mod rocksdb_impl;
pub mod storage_trait;

pub use init::DbInit;
pub use rocksdb_impl::RocksDbBackend;
pub use storage_trait::{Mutation, Partition, StorageBackend, StorageError};
