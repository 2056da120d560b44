// Default value functions

pub fn default_data_path() -> String {
    "./data".to_string()
}

pub fn default_write_buffer_size() -> usize {
    2 * 1024 * 1024 // 2MB per column family
}

pub fn default_max_write_buffers() -> i32 {
    2
}

pub fn default_block_cache_size() -> usize {
    4 * 1024 * 1024 // 4MB, shared across all column families
}

pub fn default_max_background_jobs() -> i32 {
    4
}

pub fn default_max_open_files() -> i32 {
    512
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}
