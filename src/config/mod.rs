//! Store configuration: types, defaults, and the TOML loader.

pub mod defaults;
mod loader;
mod types;

pub use types::{LoggingSettings, StorageSettings, StoreConfig};
