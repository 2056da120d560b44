//! Order-preserving key encoding for cell coordinates.
//!
//! Cells are addressed by `(row, family, qualifier)`. The tuple is encoded
//! with the `storekey` crate, whose escape-sequence format preserves
//! lexicographic ordering of strings and tuples. Two properties matter here:
//!
//! - encoded keys sort by row first, so a full-partition scan yields rows in
//!   ascending byte-lexicographic row-key order;
//! - a tuple's encoding is the concatenation of its elements' encodings, so
//!   the encoding of `row` (or of `(row, family)`) is a byte-prefix of every
//!   cell key in that row (or family). Row- and family-scoped scans and
//!   deletes are plain prefix scans.
//!
//! A naive `{len}{bytes}` encoding would break ordering ("bob" → `[3, b, o,
//! b]` sorts before "alice" → `[5, a, ...]`), hence storekey.

use storekey::{Decode, Encode};

/// Encode a value to bytes using storekey's order-preserving format.
pub fn encode_key<T: Encode>(value: &T) -> Vec<u8> {
    storekey::encode_vec(value).expect("storekey encoding should not fail for valid types")
}

/// Decode a value from storekey-encoded bytes.
pub fn decode_key<T: Decode>(bytes: &[u8]) -> Result<T, String> {
    storekey::decode(&mut std::io::Cursor::new(bytes))
        .map_err(|e| format!("storekey decode error: {:?}", e))
}

/// The storage coordinate of a single cell: `(row, family, qualifier)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellKey {
    pub row: String,
    pub family: String,
    pub qualifier: String,
}

impl CellKey {
    /// Creates a cell key from its three coordinates.
    pub fn new(
        row: impl Into<String>,
        family: impl Into<String>,
        qualifier: impl Into<String>,
    ) -> Self {
        Self {
            row: row.into(),
            family: family.into(),
            qualifier: qualifier.into(),
        }
    }

    /// Serializes the full coordinate for storage.
    pub fn encoded(&self) -> Vec<u8> {
        encode_key(&(
            self.row.as_str(),
            self.family.as_str(),
            self.qualifier.as_str(),
        ))
    }

    /// Deserializes a cell key from storage bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, String> {
        let (row, family, qualifier): (String, String, String) = decode_key(bytes)?;
        Ok(Self {
            row,
            family,
            qualifier,
        })
    }

    /// Prefix matching every cell of a row.
    pub fn row_prefix(row: &str) -> Vec<u8> {
        encode_key(&row)
    }

    /// Prefix matching every cell of a `(row, family)` pair.
    pub fn family_prefix(row: &str, family: &str) -> Vec<u8> {
        encode_key(&(row, family))
    }

    /// The flattened `"family:qualifier"` column label used in row maps.
    pub fn qualified_column(&self) -> String {
        format!("{}:{}", self.family, self.qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_key_round_trip() {
        let key = CellKey::new("r1", "cf1", "c1");
        let bytes = key.encoded();
        let decoded = CellKey::decode(&bytes).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_row_prefix_matches_cell_keys() {
        let key = CellKey::new("r1", "cf1", "c1");
        assert!(key.encoded().starts_with(&CellKey::row_prefix("r1")));
        assert!(!key.encoded().starts_with(&CellKey::row_prefix("r2")));
    }

    #[test]
    fn test_family_prefix_matches_cell_keys() {
        let key = CellKey::new("r1", "cf1", "c1");
        assert!(key
            .encoded()
            .starts_with(&CellKey::family_prefix("r1", "cf1")));
        assert!(!key
            .encoded()
            .starts_with(&CellKey::family_prefix("r1", "cf2")));
    }

    #[test]
    fn test_encoding_preserves_row_order() {
        let a = CellKey::new("r1", "zz", "zz").encoded();
        let b = CellKey::new("r2", "aa", "aa").encoded();
        // Row is the leading component, so r1's cells all sort before r2's.
        assert!(a < b);
    }

    #[test]
    fn test_row_prefix_does_not_match_longer_rows() {
        // "r1" must not be treated as a prefix of row "r10".
        let key = CellKey::new("r10", "cf1", "c1");
        assert!(!key.encoded().starts_with(&CellKey::row_prefix("r1")));
    }

    #[test]
    fn test_qualified_column() {
        let key = CellKey::new("r1", "cf1", "c1");
        assert_eq!(key.qualified_column(), "cf1:c1");
    }
}
