//! # cellstore
//!
//! Table management and row-level CRUD over a column-family storage engine.
//!
//! Cells live at a `(row, family, qualifier)` coordinate inside a table.
//! Tables declare their column families at creation time and may be
//! pre-partitioned with split keys. Reads flatten a row's cells into
//! `"family:qualifier"` string maps for callers.
//!
//! ## Architecture
//!
//! ```text
//! TableClient (table lifecycle + row/cell CRUD)
//!     ↓
//! StorageBackend (generic K/V + partition operations)
//!     ↓
//! RocksDB (storage engine; partition = column family)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use cellstore::{Connection, StoreConfig};
//!
//! let config = StoreConfig::default();
//! let conn = Connection::open(&config).unwrap();
//! let client = conn.client();
//!
//! client.create_table("t1", &["cf1"], Some(&["10", "20", "30"])).unwrap();
//! client.put("t1", "r1", "cf1", "c1", "v1").unwrap();
//!
//! let row = client.get_row("t1", "r1").unwrap().unwrap();
//! assert_eq!(row.get("cf1", "c1"), Some("v1"));
//!
//! conn.close();
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod connection;
pub mod errors;
pub mod keys;
pub mod row;
pub mod split;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use catalog::{Catalog, TableDescriptor, TableState};
pub use client::TableClient;
pub use config::{LoggingSettings, StorageSettings, StoreConfig};
pub use connection::Connection;
pub use errors::{Result, TableError};
pub use keys::CellKey;
pub use row::Row;
pub use split::{normalize_split_keys, KeyRange};
pub use store::{Mutation, Partition, StorageBackend, StorageError};
