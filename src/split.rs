//! Split-key normalization and region math for pre-partitioned tables.
//!
//! A table created with split keys `[k1, .., kn]` is divided into `n + 1`
//! contiguous, non-overlapping regions:
//!
//! ```text
//! (-inf, k1], (k1, k2], ..., (kn, +inf)
//! ```
//!
//! Boundary keys are compared as raw bytes. Input order and duplicates do not
//! matter; boundaries are always normalized to a sorted, deduplicated array
//! before use. Pre-splitting spreads initial load across regions instead of
//! hammering a single hot region.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalizes boundary strings into a sorted, deduplicated array of byte keys.
///
/// Ordering is byte-lexicographic. Empty inputs produce an empty array
/// (a single-region table).
pub fn normalize_split_keys<S: AsRef<str>>(keys: &[S]) -> Vec<Vec<u8>> {
    let set: BTreeSet<Vec<u8>> = keys
        .iter()
        .map(|k| k.as_ref().as_bytes().to_vec())
        .collect();
    set.into_iter().collect()
}

/// A half-open region span `(start, end]` over the row-key space.
///
/// `start == None` means unbounded below; `end == None` means unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub start: Option<Vec<u8>>,
    pub end: Option<Vec<u8>>,
}

impl KeyRange {
    /// Whether a row key falls inside this span.
    pub fn contains(&self, key: &[u8]) -> bool {
        let above_start = match &self.start {
            Some(s) => key > s.as_slice(),
            None => true,
        };
        let within_end = match &self.end {
            Some(e) => key <= e.as_slice(),
            None => true,
        };
        above_start && within_end
    }
}

/// Expands normalized boundaries into the full list of region spans.
///
/// `n` boundaries produce `n + 1` regions; no boundaries produce the single
/// unbounded region.
pub fn regions(boundaries: &[Vec<u8>]) -> Vec<KeyRange> {
    let mut spans = Vec::with_capacity(boundaries.len() + 1);
    let mut start: Option<Vec<u8>> = None;
    for boundary in boundaries {
        spans.push(KeyRange {
            start: start.take(),
            end: Some(boundary.clone()),
        });
        start = Some(boundary.clone());
    }
    spans.push(KeyRange { start, end: None });
    spans
}

/// Index of the region a row key falls into, given normalized boundaries.
pub fn region_for(boundaries: &[Vec<u8>], row: &[u8]) -> usize {
    boundaries.partition_point(|b| b.as_slice() < row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let normalized = normalize_split_keys(&["30", "10", "20", "10"]);
        assert_eq!(
            normalized,
            vec![b"10".to_vec(), b"20".to_vec(), b"30".to_vec()]
        );
    }

    #[test]
    fn test_normalize_is_byte_lexicographic() {
        // "9" sorts after "10" as bytes, unlike numerically.
        let normalized = normalize_split_keys(&["9", "10"]);
        assert_eq!(normalized, vec![b"10".to_vec(), b"9".to_vec()]);
    }

    #[test]
    fn test_normalize_empty() {
        let normalized = normalize_split_keys::<&str>(&[]);
        assert!(normalized.is_empty());
    }

    #[test]
    fn test_three_boundaries_make_four_regions() {
        let boundaries = normalize_split_keys(&["10", "20", "30"]);
        let spans = regions(&boundaries);

        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0], KeyRange { start: None, end: Some(b"10".to_vec()) });
        assert_eq!(
            spans[1],
            KeyRange { start: Some(b"10".to_vec()), end: Some(b"20".to_vec()) }
        );
        assert_eq!(
            spans[2],
            KeyRange { start: Some(b"20".to_vec()), end: Some(b"30".to_vec()) }
        );
        assert_eq!(spans[3], KeyRange { start: Some(b"30".to_vec()), end: None });
    }

    #[test]
    fn test_no_boundaries_single_region() {
        let spans = regions(&[]);
        assert_eq!(spans, vec![KeyRange { start: None, end: None }]);
        assert!(spans[0].contains(b"anything"));
    }

    #[test]
    fn test_region_spans_are_exclusive_inclusive() {
        let boundaries = normalize_split_keys(&["10", "20"]);
        let spans = regions(&boundaries);

        // Boundary keys belong to the region they close.
        assert!(spans[0].contains(b"10"));
        assert!(!spans[1].contains(b"10"));
        assert!(spans[1].contains(b"15"));
        assert!(spans[1].contains(b"20"));
        assert!(spans[2].contains(b"25"));
    }

    #[test]
    fn test_region_for_locates_keys() {
        let boundaries = normalize_split_keys(&["10", "20", "30"]);

        assert_eq!(region_for(&boundaries, b"05"), 0);
        assert_eq!(region_for(&boundaries, b"10"), 0);
        assert_eq!(region_for(&boundaries, b"15"), 1);
        assert_eq!(region_for(&boundaries, b"20"), 1);
        assert_eq!(region_for(&boundaries, b"25"), 2);
        assert_eq!(region_for(&boundaries, b"35"), 3);
    }

    #[test]
    fn test_region_for_agrees_with_contains() {
        let boundaries = normalize_split_keys(&["b", "d", "f"]);
        let spans = regions(&boundaries);

        for key in [&b"a"[..], b"b", b"c", b"d", b"e", b"f", b"g"] {
            let idx = region_for(&boundaries, key);
            assert!(spans[idx].contains(key));
        }
    }
}
