//! Database initialization.
//!
//! Thin helper that opens (or creates) a RocksDB instance at the configured
//! path with the catalog column family present and every previously created
//! table column family reopened.

use crate::catalog::CATALOG_PARTITION;
use crate::config::StorageSettings;
use anyhow::Result;
use rocksdb::{BlockBasedOptions, Cache, ColumnFamilyDescriptor, Options, DB};
use std::path::Path;
use std::sync::Arc;

/// Database initializer for creating/opening a store with the catalog CF.
pub struct DbInit {
    db_path: String,
    settings: StorageSettings,
}

impl DbInit {
    /// Create a new initializer from storage settings.
    pub fn new(settings: &StorageSettings) -> Self {
        Self {
            db_path: settings.data_path.clone(),
            settings: settings.clone(),
        }
    }

    /// Open or create the database and ensure the catalog CF exists.
    ///
    /// Existing table column families are listed from disk and reopened, so
    /// tables survive process restarts.
    pub fn open(&self) -> Result<Arc<DB>> {
        let path = Path::new(&self.db_path);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        db_opts.set_write_buffer_size(self.settings.write_buffer_size);
        db_opts.set_max_write_buffer_number(self.settings.max_write_buffers);
        db_opts.set_max_background_jobs(self.settings.max_background_jobs);
        db_opts.increase_parallelism(self.settings.max_background_jobs);
        db_opts.set_max_open_files(self.settings.max_open_files);

        // Block cache is shared across all column families, so the number of
        // tables does not multiply cache memory.
        let cache = Cache::new_lru_cache(self.settings.block_cache_size);
        db_opts.set_block_based_table_factory(&block_options_with_cache(&cache));

        // Determine existing CFs (or default if DB missing)
        let mut existing = match DB::list_cf(&db_opts, path) {
            Ok(cfs) if !cfs.is_empty() => cfs,
            _ => vec!["default".to_string()],
        };

        if !existing.iter().any(|n| n == CATALOG_PARTITION) {
            existing.push(CATALOG_PARTITION.to_string());
        }

        let cf_descriptors: Vec<_> = existing
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_write_buffer_size(self.settings.write_buffer_size);
                cf_opts.set_max_write_buffer_number(self.settings.max_write_buffers);
                cf_opts.set_block_based_table_factory(&block_options_with_cache(&cache));
                ColumnFamilyDescriptor::new(name, cf_opts)
            })
            .collect();

        let cf_names: Vec<String> = existing.clone();
        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;
        let db = Arc::new(db);

        // Compact all column families on startup if enabled; reduces SST file
        // count after bulk loads.
        if self.settings.compact_on_startup {
            log::debug!(
                "Running startup compaction for {} column families...",
                cf_names.len()
            );
            let start = std::time::Instant::now();
            for cf_name in &cf_names {
                if let Some(cf) = db.cf_handle(cf_name) {
                    db.compact_range_cf(cf, None::<&[u8]>, None::<&[u8]>);
                }
            }
            log::info!("Startup compaction completed in {:?}", start.elapsed());
        }

        Ok(db)
    }
}

fn block_options_with_cache(cache: &Cache) -> BlockBasedOptions {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    // Bloom + cached metadata improve the point lookups used by cell reads.
    block_opts.set_bloom_filter(10.0, false);
    block_opts.set_cache_index_and_filter_blocks(true);
    block_opts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageSettings;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_catalog_cf() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = StorageSettings::default();
        settings.data_path = temp_dir.path().display().to_string();

        let db = DbInit::new(&settings).open().unwrap();
        assert!(db.cf_handle(CATALOG_PARTITION).is_some());
    }

    #[test]
    fn test_reopen_preserves_column_families() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = StorageSettings::default();
        settings.data_path = temp_dir.path().display().to_string();

        {
            let db = DbInit::new(&settings).open().unwrap();
            let mut_db = Arc::as_ptr(&db) as *mut DB;
            unsafe {
                (*mut_db).create_cf("table:t1", &Options::default()).unwrap();
            }
        }

        let db = DbInit::new(&settings).open().unwrap();
        assert!(db.cf_handle("table:t1").is_some());
    }
}
