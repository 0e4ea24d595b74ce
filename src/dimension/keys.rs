//! Surrogate key generation
//!
//! Keys are monotonically increasing and unique within the process. They
//! carry no identity across runs: a rerun may hand out different values for
//! the same business key.

use std::ops::Range;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out unique surrogate keys to every builder of a run
#[derive(Debug, Default)]
pub struct SurrogateKeyGenerator {
    next: AtomicI64,
}

impl SurrogateKeyGenerator {
    /// Create a generator starting at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose first key is `start`
    #[must_use]
    pub fn starting_at(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }

    /// Next single key
    pub fn next_key(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Reserve a contiguous block of `count` keys
    pub fn reserve(&self, count: usize) -> Range<i64> {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        let start = self.next.fetch_add(count, Ordering::Relaxed);
        start..start.saturating_add(count)
    }
}
