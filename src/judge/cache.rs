//! In-memory verdict cache.

use std::fmt;

use moka::sync::Cache;

use crate::constants;
use crate::hashing::verdict_key;

/// Cache of judge scores keyed by the BLAKE3 digest of the
/// (feature text, user input text) pair.
///
/// A verdict is a pure function of its key, so entries never go stale;
/// capacity eviction is the only removal path.
pub struct VerdictCache {
    entries: Cache<[u8; 32], f64>,
}

impl VerdictCache {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(constants::DEFAULT_JUDGE_CACHE_CAPACITY)
    }

    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Looks up a cached score for the text pair.
    #[inline]
    pub fn lookup(&self, feature_text: &str, user_input_text: &str) -> Option<f64> {
        self.entries.get(&verdict_key(feature_text, user_input_text))
    }

    /// Stores a score for the text pair.
    #[inline]
    pub fn insert(&self, feature_text: &str, user_input_text: &str, score: f64) {
        self.entries.insert(verdict_key(feature_text, user_input_text), score);
    }

    /// Approximate number of cached verdicts.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached verdict.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Flushes pending internal maintenance so `len` reflects recent writes.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl Default for VerdictCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VerdictCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerdictCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
