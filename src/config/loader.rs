use super::types::StoreConfig;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

impl StoreConfig {
    /// Load configuration from a TOML file
    ///
    /// Note: ad hoc overrides are applied separately via `apply_options()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: StoreConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Apply an arbitrary mapping of string keys to string values onto the
    /// base configuration.
    ///
    /// Keys use dotted `section.field` form (e.g. "storage.data_path").
    /// Unknown keys and unparsable values are errors rather than being
    /// silently dropped.
    pub fn apply_options(&mut self, options: &HashMap<String, String>) -> anyhow::Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T>
        where
            T::Err: std::fmt::Display,
        {
            value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid value '{}' for '{}': {}", value, key, e))
        }

        for (key, value) in options {
            match key.as_str() {
                "storage.data_path" => self.storage.data_path = value.clone(),
                "storage.write_buffer_size" => {
                    self.storage.write_buffer_size = parse(key, value)?
                }
                "storage.max_write_buffers" => {
                    self.storage.max_write_buffers = parse(key, value)?
                }
                "storage.block_cache_size" => self.storage.block_cache_size = parse(key, value)?,
                "storage.max_background_jobs" => {
                    self.storage.max_background_jobs = parse(key, value)?
                }
                "storage.max_open_files" => self.storage.max_open_files = parse(key, value)?,
                "storage.compact_on_startup" => {
                    self.storage.compact_on_startup = parse(key, value)?
                }
                "logging.level" => self.logging.level = value.clone(),
                "logging.format" => self.logging.format = value.clone(),
                _ => return Err(anyhow::anyhow!("Unknown configuration key '{}'", key)),
            }
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.storage.data_path.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.data_path cannot be empty"));
        }

        if self.storage.write_buffer_size == 0 {
            return Err(anyhow::anyhow!("storage.write_buffer_size cannot be 0"));
        }

        if self.storage.block_cache_size == 0 {
            return Err(anyhow::anyhow!("storage.block_cache_size cannot be 0"));
        }

        if self.storage.max_write_buffers <= 0 {
            return Err(anyhow::anyhow!("storage.max_write_buffers must be positive"));
        }

        // Validate log level
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        // Validate log format
        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        Ok(())
    }
}
