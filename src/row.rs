//! Row result type and the flattened map representation.
//!
//! A read returns the latest value per `(family, qualifier)` coordinate;
//! version/timestamp information is not retained. Cells are labeled with the
//! flattened `"family:qualifier"` form, and `into_map()` additionally carries
//! the row key under the `"row"` entry.

use std::collections::BTreeMap;

/// A single row: its key plus the flattened cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: String,
    cells: BTreeMap<String, String>,
}

impl Row {
    /// Creates an empty row with the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cells: BTreeMap::new(),
        }
    }

    /// The row key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn insert_cell(&mut self, family: &str, qualifier: &str, value: String) {
        self.cells.insert(format!("{}:{}", family, qualifier), value);
    }

    /// Value at `(family, qualifier)`, if present.
    pub fn get(&self, family: &str, qualifier: &str) -> Option<&str> {
        self.cells
            .get(&format!("{}:{}", family, qualifier))
            .map(String::as_str)
    }

    /// All cells, keyed by `"family:qualifier"`.
    pub fn cells(&self) -> &BTreeMap<String, String> {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Flattens into a single map: a `"row"` entry holding the row key plus
    /// one `"family:qualifier"` entry per cell.
    pub fn into_map(self) -> BTreeMap<String, String> {
        let mut map = self.cells;
        map.insert("row".to_string(), self.key);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cell() {
        let mut row = Row::new("r1");
        row.insert_cell("cf1", "c1", "v1".to_string());

        assert_eq!(row.get("cf1", "c1"), Some("v1"));
        assert_eq!(row.get("cf1", "c2"), None);
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_into_map_flattening() {
        let mut row = Row::new("r1");
        row.insert_cell("cf1", "c1", "v1".to_string());

        let map = row.into_map();
        assert_eq!(map.get("row").map(String::as_str), Some("r1"));
        assert_eq!(map.get("cf1:c1").map(String::as_str), Some("v1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_row() {
        let row = Row::new("r1");
        assert!(row.is_empty());
        assert_eq!(row.into_map().len(), 1); // just the "row" entry
    }
}
