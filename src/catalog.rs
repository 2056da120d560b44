//! Table metadata registry.
//!
//! Descriptors are persisted as JSON in a dedicated catalog partition and
//! cached in memory, so existence checks never hit the engine. The cache is
//! loaded once at connection open; all mutations write through to the
//! partition before updating the cache.

use crate::keys::encode_key;
use crate::split::{self, KeyRange};
use crate::store::{Partition, StorageBackend, StorageError};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the partition holding table descriptors.
pub const CATALOG_PARTITION: &str = "catalog";

/// Partition holding a table's cell data.
pub fn table_partition(table: &str) -> Partition {
    Partition::new(format!("table:{}", table))
}

/// Lifecycle state of a table.
///
/// The store refuses to delete an enabled table; teardown is always
/// disable-then-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableState {
    Enabled,
    Disabled,
}

/// Persistent description of a table: its families and split boundaries.
///
/// The family set is fixed for the table's lifetime. Split boundaries are
/// stored in normalized (sorted, deduplicated) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub families: Vec<String>,
    pub split_keys: Vec<Vec<u8>>,
    pub state: TableState,
}

impl TableDescriptor {
    /// Creates an enabled descriptor. `split_keys` must already be normalized
    /// via [`split::normalize_split_keys`].
    pub fn new(name: impl Into<String>, families: Vec<String>, split_keys: Vec<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            families,
            split_keys,
            state: TableState::Enabled,
        }
    }

    /// Whether the family is declared on this table.
    pub fn has_family(&self, family: &str) -> bool {
        self.families.iter().any(|f| f == family)
    }

    /// The region spans implied by the split boundaries (`n + 1` regions for
    /// `n` boundaries).
    pub fn regions(&self) -> Vec<KeyRange> {
        split::regions(&self.split_keys)
    }

    /// Index of the region a row key falls into.
    pub fn region_for(&self, row: &str) -> usize {
        split::region_for(&self.split_keys, row.as_bytes())
    }
}

/// In-memory view of the persisted table catalog.
pub struct Catalog {
    backend: Arc<dyn StorageBackend>,
    tables: DashMap<String, TableDescriptor>,
}

impl Catalog {
    /// Loads all descriptors from the catalog partition.
    pub fn load(backend: Arc<dyn StorageBackend>) -> Result<Self, StorageError> {
        let partition = Partition::new(CATALOG_PARTITION);
        let tables = DashMap::new();

        for (_, value) in backend.scan(&partition, None)? {
            let desc: TableDescriptor = serde_json::from_slice(&value)
                .map_err(|e| StorageError::Codec(e.to_string()))?;
            tables.insert(desc.name.clone(), desc);
        }

        log::debug!("catalog loaded: {} table(s)", tables.len());
        Ok(Self { backend, tables })
    }

    /// Whether a table is registered.
    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// A snapshot of a table's descriptor.
    pub fn get(&self, table: &str) -> Option<TableDescriptor> {
        self.tables.get(table).map(|entry| entry.clone())
    }

    /// Names of all registered tables.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Persists a descriptor and updates the cache.
    pub fn insert(&self, desc: TableDescriptor) -> Result<(), StorageError> {
        let partition = Partition::new(CATALOG_PARTITION);
        let value = serde_json::to_vec(&desc)
            .map_err(|e| StorageError::Codec(e.to_string()))?;
        self.backend
            .put(&partition, &encode_key(&desc.name.as_str()), &value)?;
        self.tables.insert(desc.name.clone(), desc);
        Ok(())
    }

    /// Removes a descriptor from storage and the cache.
    pub fn remove(&self, table: &str) -> Result<(), StorageError> {
        let partition = Partition::new(CATALOG_PARTITION);
        self.backend.delete(&partition, &encode_key(&table))?;
        self.tables.remove(table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::normalize_split_keys;
    use crate::store::RocksDbBackend;
    use rocksdb::{Options, DB};
    use tempfile::TempDir;

    fn create_test_backend() -> (Arc<dyn StorageBackend>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf(&opts, temp_dir.path(), [CATALOG_PARTITION]).unwrap();
        let backend: Arc<dyn StorageBackend> = Arc::new(RocksDbBackend::new(Arc::new(db)));
        (backend, temp_dir)
    }

    #[test]
    fn test_descriptor_regions() {
        let desc = TableDescriptor::new(
            "t1",
            vec!["cf1".to_string()],
            normalize_split_keys(&["10", "20", "30"]),
        );

        assert_eq!(desc.regions().len(), 4);
        assert_eq!(desc.region_for("05"), 0);
        assert_eq!(desc.region_for("25"), 2);
        assert_eq!(desc.region_for("99"), 3);
    }

    #[test]
    fn test_insert_and_contains() {
        let (backend, _temp) = create_test_backend();
        let catalog = Catalog::load(backend).unwrap();

        assert!(!catalog.contains("t1"));
        catalog
            .insert(TableDescriptor::new("t1", vec!["cf1".to_string()], vec![]))
            .unwrap();
        assert!(catalog.contains("t1"));
        assert!(catalog.get("t1").unwrap().has_family("cf1"));
    }

    #[test]
    fn test_remove() {
        let (backend, _temp) = create_test_backend();
        let catalog = Catalog::load(backend).unwrap();

        catalog
            .insert(TableDescriptor::new("t1", vec!["cf1".to_string()], vec![]))
            .unwrap();
        catalog.remove("t1").unwrap();
        assert!(!catalog.contains("t1"));
    }

    #[test]
    fn test_descriptors_survive_reload() {
        let (backend, _temp) = create_test_backend();

        {
            let catalog = Catalog::load(Arc::clone(&backend)).unwrap();
            catalog
                .insert(TableDescriptor::new(
                    "t1",
                    vec!["cf1".to_string(), "cf2".to_string()],
                    normalize_split_keys(&["m"]),
                ))
                .unwrap();
        }

        let catalog = Catalog::load(backend).unwrap();
        let desc = catalog.get("t1").unwrap();
        assert_eq!(desc.families, vec!["cf1", "cf2"]);
        assert_eq!(desc.split_keys, vec![b"m".to_vec()]);
        assert_eq!(desc.state, TableState::Enabled);
    }
}
