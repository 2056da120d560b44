//! RocksDB-backed storage.
//!
//! Partitions map one-to-one onto column families: one per table for cell
//! data plus one for the catalog. Scans read through a snapshot and bound
//! prefix queries with an exclusive upper key, so a row scan never walks past
//! the row and never sees writes spliced in mid-read.

use crate::store::storage_trait::{Mutation, Partition, Result, StorageBackend, StorageError};
use rocksdb::{ColumnFamily, Direction, IteratorMode, Options, ReadOptions, WriteBatch, DB};
use std::sync::Arc;

pub struct RocksDbBackend {
    db: Arc<DB>,
}

impl RocksDbBackend {
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }

    fn cf(&self, partition: &Partition) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))
    }
}

fn engine_err(e: rocksdb::Error) -> StorageError {
    StorageError::Engine(e.to_string())
}

/// Smallest byte string sorting after every key that starts with `prefix`:
/// the prefix with its last non-0xff byte incremented and the tail dropped.
/// `None` when no bound exists (empty or all-0xff prefix); in that case every
/// key at or past the prefix carries it anyway.
fn prefix_upper_bound(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut bound = prefix.to_vec();
    while let Some(last) = bound.last_mut() {
        if *last < u8::MAX {
            *last += 1;
            return Some(bound);
        }
        bound.pop();
    }
    None
}

impl StorageBackend for RocksDbBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db.get_cf(self.cf(partition)?, key).map_err(engine_err)
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        self.db
            .put_cf(self.cf(partition)?, key, value)
            .map_err(engine_err)
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        self.db
            .delete_cf(self.cf(partition)?, key)
            .map_err(engine_err)
    }

    fn apply(&self, mutations: Vec<Mutation>) -> Result<()> {
        let mut batch = WriteBatch::default();
        for mutation in mutations {
            match mutation {
                Mutation::Put {
                    partition,
                    key,
                    value,
                } => batch.put_cf(self.cf(&partition)?, key, value),
                Mutation::Delete { partition, key } => {
                    batch.delete_cf(self.cf(&partition)?, key)
                }
            }
        }
        self.db.write(batch).map_err(engine_err)
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let cf = self.cf(partition)?;
        let snapshot = self.db.snapshot();

        let mut opts = ReadOptions::default();
        let mode = match prefix {
            Some(p) => {
                if let Some(bound) = prefix_upper_bound(p) {
                    opts.set_iterate_upper_bound(bound);
                }
                IteratorMode::From(p, Direction::Forward)
            }
            None => IteratorMode::Start,
        };

        let mut entries = Vec::new();
        for item in snapshot.iterator_cf_opt(cf, opts, mode) {
            let (key, value) = item.map_err(engine_err)?;
            entries.push((key.into_vec(), value.into_vec()));
        }
        Ok(entries)
    }

    fn has_partition(&self, partition: &Partition) -> bool {
        self.db.cf_handle(partition.name()).is_some()
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        if self.has_partition(partition) {
            return Ok(());
        }

        // create_cf takes &mut DB but the column family registry is locked
        // inside RocksDB; the Arc pins the instance for the raw deref.
        let created = unsafe {
            let db = Arc::as_ptr(&self.db) as *mut DB;
            (*db).create_cf(partition.name(), &Options::default())
        };

        match created {
            Ok(()) => Ok(()),
            // Lost a creation race; the partition is there now.
            Err(e) if e.to_string().to_lowercase().contains("already exists") => Ok(()),
            Err(e) => Err(engine_err(e)),
        }
    }

    fn drop_partition(&self, partition: &Partition) -> Result<()> {
        if !self.has_partition(partition) {
            return Ok(());
        }

        // Same registry lock as create_partition.
        let dropped = unsafe {
            let db = Arc::as_ptr(&self.db) as *mut DB;
            (*db).drop_cf(partition.name())
        };
        dropped.map_err(engine_err)
    }
}
