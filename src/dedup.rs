//! Deduplication strategies for the weave merge
//!
//! Two approaches with different memory/precision trade-offs:
//! - Fingerprint: stores a 64-bit hash per unique line (fixed memory per
//!   line regardless of line length)
//! - Exact: stores the line bytes themselves (collision-free, memory grows
//!   with line content)
//!
//! Either way the seen-set grows linearly with the number of unique lines
//! for the whole run and is never reclaimed mid-merge. That is the required
//! semantic: full-run exact dedup, no eviction.

use std::hash::{BuildHasher, Hasher};

use ahash::RandomState;
use hashbrown::HashSet;

use crate::cli::DedupStrategy;

/// Trait for seen-line tracking during a single merge run.
pub trait Deduplicator {
    /// Record `line` as seen. Returns true if it had not been seen before.
    fn insert(&mut self, line: &[u8]) -> bool;

    /// Number of unique lines recorded so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Approximate memory usage in bytes.
    fn memory_usage(&self) -> usize;
}

/// Fingerprint-only deduplicator.
///
/// Only a 64-bit `ahash` digest of each line is retained, never the line
/// text. Two distinct lines that collide under the hash are treated as the
/// same line and the later one is dropped; at 64 bits that risk stays
/// negligible for realistic wordlist sizes (birthday bound ~1 collision per
/// 2^32 unique lines). Use [`ExactDeduplicator`] when collisions are not
/// acceptable at all.
pub struct FingerprintDeduplicator {
    seen: HashSet<u64, RandomState>,
    hasher: RandomState,
}

impl FingerprintDeduplicator {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
            hasher: RandomState::new(),
        }
    }

    fn fingerprint(&self, line: &[u8]) -> u64 {
        let mut hasher = self.hasher.build_hasher();
        hasher.write(line);
        hasher.finish()
    }
}

impl Default for FingerprintDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for FingerprintDeduplicator {
    fn insert(&mut self, line: &[u8]) -> bool {
        let fingerprint = self.fingerprint(line);
        self.seen.insert(fingerprint)
    }

    fn len(&self) -> usize {
        self.seen.len()
    }

    fn memory_usage(&self) -> usize {
        // Eight bytes per slot plus hashbrown's control byte.
        self.seen.capacity() * (std::mem::size_of::<u64>() + 1)
    }
}

/// Exact deduplicator storing owned line bytes.
///
/// No collision risk, at the cost of holding every unique line in memory.
pub struct ExactDeduplicator {
    seen: HashSet<Vec<u8>, RandomState>,
    stored_bytes: usize,
}

impl ExactDeduplicator {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
            stored_bytes: 0,
        }
    }
}

impl Default for ExactDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for ExactDeduplicator {
    fn insert(&mut self, line: &[u8]) -> bool {
        if self.seen.contains(line) {
            return false;
        }
        self.stored_bytes += line.len();
        self.seen.insert(line.to_vec());
        true
    }

    fn len(&self) -> usize {
        self.seen.len()
    }

    fn memory_usage(&self) -> usize {
        self.stored_bytes + self.seen.capacity() * (std::mem::size_of::<Vec<u8>>() + 1)
    }
}

/// Create a deduplicator for the chosen strategy, pre-sized for the
/// estimated number of unique lines.
pub fn create_deduplicator(
    strategy: DedupStrategy,
    expected_lines: usize,
) -> Box<dyn Deduplicator> {
    match strategy {
        DedupStrategy::Fingerprint => {
            Box::new(FingerprintDeduplicator::with_capacity(expected_lines))
        }
        DedupStrategy::Exact => Box::new(ExactDeduplicator::with_capacity(expected_lines)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_deduplicator() {
        let mut dedup = FingerprintDeduplicator::new();

        assert!(dedup.insert(b"password"));
        assert!(dedup.insert(b"letmein"));
        assert!(!dedup.insert(b"password"));

        assert_eq!(dedup.len(), 2);
        assert!(dedup.memory_usage() > 0);
    }

    #[test]
    fn exact_deduplicator() {
        let mut dedup = ExactDeduplicator::new();

        assert!(dedup.insert(b"password"));
        assert!(dedup.insert(b"letmein"));
        assert!(!dedup.insert(b"password"));

        assert_eq!(dedup.len(), 2);
        assert!(dedup.memory_usage() >= "passwordletmein".len());
    }

    #[test]
    fn empty_line_is_a_line() {
        let mut dedup = FingerprintDeduplicator::new();
        assert!(dedup.insert(b""));
        assert!(!dedup.insert(b""));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn strategies_agree_on_unique_counts() {
        let words: Vec<&[u8]> = vec![
            b"alpha", b"bravo", b"alpha", b"charlie", b"bravo", b"delta", b"",
        ];

        let mut fingerprint = create_deduplicator(DedupStrategy::Fingerprint, 8);
        let mut exact = create_deduplicator(DedupStrategy::Exact, 8);

        for word in &words {
            assert_eq!(fingerprint.insert(word), exact.insert(word));
        }
        assert_eq!(fingerprint.len(), exact.len());
        assert_eq!(fingerprint.len(), 5);
    }

    #[test]
    fn capacity_hint_does_not_change_behavior() {
        let mut dedup = FingerprintDeduplicator::with_capacity(1_000);
        assert!(dedup.is_empty());
        assert!(dedup.insert(b"x"));
        assert!(!dedup.is_empty());
    }
}
