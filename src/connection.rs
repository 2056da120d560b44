//! Explicitly owned store connection.
//!
//! A `Connection` is constructed once at startup from a validated
//! configuration and handed by reference to every caller. There is no global
//! handle and no half-open state: `open` either yields a usable connection or
//! an error, and `close` tears it down explicitly.

use crate::catalog::{table_partition, Catalog};
use crate::client::TableClient;
use crate::config::StoreConfig;
use crate::store::{DbInit, RocksDbBackend, StorageBackend};
use std::sync::Arc;

/// A live connection to the store: the engine backend plus the table catalog.
pub struct Connection {
    backend: Arc<dyn StorageBackend>,
    catalog: Catalog,
}

impl Connection {
    /// Opens (or creates) the store described by the configuration.
    ///
    /// Validates the configuration, opens the engine with all existing table
    /// partitions, and loads the table catalog into memory.
    pub fn open(config: &StoreConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let db = DbInit::new(&config.storage).open()?;
        let backend: Arc<dyn StorageBackend> = Arc::new(RocksDbBackend::new(db));
        let catalog = Catalog::load(Arc::clone(&backend))?;

        // The catalog is the source of truth: a descriptor whose partition
        // is missing (an interrupted create) gets its partition back here.
        for table in catalog.table_names() {
            let partition = table_partition(&table);
            if !backend.has_partition(&partition) {
                log::warn!("recreating missing partition for table '{}'", table);
                backend.create_partition(&partition)?;
            }
        }

        log::info!(
            "store opened at {} ({} table(s))",
            config.storage.data_path,
            catalog.table_names().len()
        );

        Ok(Self { backend, catalog })
    }

    /// A facade handle for table and row operations.
    pub fn client(&self) -> TableClient<'_> {
        TableClient::new(&self.backend, &self.catalog)
    }

    /// The raw storage backend.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Shuts the connection down, releasing the engine handle.
    pub fn close(self) {
        log::info!("store connection closed");
        drop(self);
    }
}
