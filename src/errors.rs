//! Error types for table and cell operations.
//!
//! The facade reports failures through a single `TableError` enum instead of
//! sentinel return values. Storage-level failures are wrapped rather than
//! flattened so callers can still distinguish a missing table from an engine
//! I/O problem.

use crate::store::StorageError;
use std::fmt;

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors produced by table-management and CRUD operations.
#[derive(Debug, Clone)]
pub enum TableError {
    /// Table is not registered in the catalog
    NotFound(String),

    /// Table is still enabled; it must be disabled before deletion
    Enabled(String),

    /// Column family is not declared on the table
    FamilyNotFound { table: String, family: String },

    /// Invalid input provided to an operation
    InvalidInput(String),

    /// Failure from the underlying storage engine
    Storage(StorageError),
}

impl TableError {
    /// Creates a NotFound error for a table name.
    pub fn not_found(table: impl Into<String>) -> Self {
        Self::NotFound(table.into())
    }

    /// Creates an InvalidInput error with a message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::NotFound(t) => write!(f, "Table not found: {}", t),
            TableError::Enabled(t) => {
                write!(f, "Table is enabled and must be disabled first: {}", t)
            }
            TableError::FamilyNotFound { table, family } => {
                write!(f, "Column family '{}' not found on table '{}'", family, table)
            }
            TableError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TableError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for TableError {
    fn from(e: StorageError) -> Self {
        TableError::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableError::NotFound("t1".to_string());
        assert_eq!(err.to_string(), "Table not found: t1");

        let err = TableError::FamilyNotFound {
            table: "t1".to_string(),
            family: "cf9".to_string(),
        };
        assert_eq!(err.to_string(), "Column family 'cf9' not found on table 't1'");
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: TableError = StorageError::Engine("disk full".to_string()).into();
        assert!(matches!(err, TableError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: engine error: disk full");
    }
}
