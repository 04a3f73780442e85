//! Mutation counter and generation tokens.
//!
//! A [`Generation`] is handed to every resolution call. Cached values are
//! valid only for the generation they were computed under.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the mutation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(u64);

impl Generation {
    pub const INITIAL: Generation = Generation(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Monotonic counter bumped on every relevant source edit.
///
/// Owned by whoever tracks content changes; everyone else only reads it.
#[derive(Debug, Default)]
pub struct ModificationTracker {
    count: AtomicU64,
}

impl ModificationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation.
    pub fn current(&self) -> Generation {
        Generation(self.count.load(Ordering::Acquire))
    }

    /// Record an edit and return the new generation.
    pub fn bump(&self) -> Generation {
        Generation(self.count.fetch_add(1, Ordering::AcqRel) + 1)
    }
}
