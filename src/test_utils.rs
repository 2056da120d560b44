//! Test utilities.
//!
//! Provides helpers for setting up disposable stores with minimal boilerplate.

use crate::config::StoreConfig;
use crate::connection::Connection;
use anyhow::Result;
use tempfile::TempDir;

/// Test store wrapper that automatically cleans up on drop.
pub struct TestStore {
    /// Open connection backed by a temporary directory
    pub conn: Connection,
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
}

impl TestStore {
    /// Create a new store in a temporary directory with default settings.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let mut config = StoreConfig::default();
        config.storage.data_path = temp_dir.path().display().to_string();

        let conn = Connection::open(&config)?;
        Ok(Self { conn, temp_dir })
    }

    /// The configuration path of this store (for reopen tests).
    pub fn data_path(&self) -> String {
        self.temp_dir.path().display().to_string()
    }

    /// Splits the store into its connection and backing directory, for tests
    /// that close the connection and reopen the same path.
    pub fn into_parts(self) -> (Connection, TempDir) {
        (self.conn, self.temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_store() {
        let store = TestStore::new().unwrap();
        assert!(!store.conn.client().table_exists("t1").unwrap());
    }
}
