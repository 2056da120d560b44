use super::defaults::*;
use serde::{Deserialize, Serialize};

/// Main store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Storage engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the database files
    /// Default: "./data"
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Write buffer size per column family in bytes (default: 2MB)
    #[serde(default = "default_write_buffer_size")]
    pub write_buffer_size: usize,

    /// Maximum number of write buffers (default: 2)
    #[serde(default = "default_max_write_buffers")]
    pub max_write_buffers: i32,

    /// Block cache size for reads in bytes (default: 4MB, SHARED across all CFs)
    /// This cache is shared, so adding tables doesn't multiply memory.
    #[serde(default = "default_block_cache_size")]
    pub block_cache_size: usize,

    /// Maximum number of background jobs (default: 4)
    #[serde(default = "default_max_background_jobs")]
    pub max_background_jobs: i32,

    /// Maximum number of open files the engine can keep open (default: 512)
    /// Set to -1 for unlimited.
    #[serde(default = "default_max_open_files")]
    pub max_open_files: i32,

    /// Compact all column families on startup (default: false)
    #[serde(default)]
    pub compact_on_startup: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            write_buffer_size: default_write_buffer_size(),
            max_write_buffers: default_max_write_buffers(),
            block_cache_size: default_block_cache_size(),
            max_background_jobs: default_max_background_jobs(),
            max_open_files: default_max_open_files(),
            compact_on_startup: false,
        }
    }
}

/// Logging settings for embedders; the library itself only emits through the
/// `log` facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
