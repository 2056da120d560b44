//! The seam between the table layer and the storage engine.
//!
//! The catalog and the facade never name a concrete engine; they hold an
//! `Arc<dyn StorageBackend>` and speak in partitions and raw byte keys. The
//! surface is deliberately small: point reads and writes, one atomic
//! multi-mutation apply, ordered (optionally prefix-bounded) scans, and
//! partition lifecycle. Each table owns one partition for its cells and the
//! catalog owns one for descriptors.

use std::fmt;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures reported by a storage backend.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// The named partition does not exist.
    PartitionNotFound(String),
    /// The engine rejected or failed the operation.
    Engine(String),
    /// Stored bytes could not be decoded.
    Codec(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PartitionNotFound(p) => write!(f, "partition not found: {}", p),
            StorageError::Engine(msg) => write!(f, "engine error: {}", msg),
            StorageError::Codec(msg) => write!(f, "codec error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// A named keyspace inside the engine. Maps to a column family in RocksDB.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition(String);

impl Partition {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// One entry of an atomic write. A multi-column put or a multi-row delete is
/// a `Vec<Mutation>` handed to [`StorageBackend::apply`].
#[derive(Debug, Clone)]
pub enum Mutation {
    Put {
        partition: Partition,
        key: Vec<u8>,
        value: Vec<u8>,
    },
    Delete {
        partition: Partition,
        key: Vec<u8>,
    },
}

/// Engine operations the table layer needs, nothing more.
///
/// Implementations are shared across threads (`Send + Sync`); concurrency
/// guarantees are exactly whatever the engine provides. Operations on a
/// partition that does not exist report `PartitionNotFound`.
pub trait StorageBackend: Send + Sync {
    /// Point read. `Ok(None)` when the key is absent.
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Point write; overwrites an existing value.
    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()>;

    /// Point delete; deleting an absent key is a no-op.
    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()>;

    /// Applies every mutation atomically: all land or none do.
    fn apply(&self, mutations: Vec<Mutation>) -> Result<()>;

    /// Reads entries in ascending byte order, restricted to keys starting
    /// with `prefix` when one is given. The result is a consistent point-in-
    /// time view.
    fn scan(&self, partition: &Partition, prefix: Option<&[u8]>)
        -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Whether the partition exists.
    fn has_partition(&self, partition: &Partition) -> bool;

    /// Creates the partition. Idempotent.
    fn create_partition(&self, partition: &Partition) -> Result<()>;

    /// Drops the partition and every key in it.
    fn drop_partition(&self, partition: &Partition) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::PartitionNotFound("table:t1".to_string());
        assert_eq!(err.to_string(), "partition not found: table:t1");

        let err = StorageError::Engine("io error".to_string());
        assert_eq!(err.to_string(), "engine error: io error");

        let err = StorageError::Codec("truncated key".to_string());
        assert_eq!(err.to_string(), "codec error: truncated key");
    }
}
