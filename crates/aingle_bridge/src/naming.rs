//! Process-wide naming service for auto-named variables.
//!
//! Default-constructed [`Variable`](crate::Variable)s are named `_0`, `_1`, ...
//! from a single atomic sequence that starts at zero when the process starts and
//! is never reset, so generated names are unique for the process lifetime.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing source of `_N` variable names.
#[derive(Debug)]
pub struct NameSequence {
    next: AtomicU64,
}

static GLOBAL: NameSequence = NameSequence::new();

impl NameSequence {
    /// Creates a sequence starting at zero.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Returns the process-wide sequence used by `Variable::new`.
    pub fn global() -> &'static NameSequence {
        &GLOBAL
    }

    /// Claims the next sequence value. Values are never handed out twice.
    pub fn next_index(&self) -> u64 {
        // Only uniqueness matters, not cross-thread ordering.
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Claims the next value and formats it as a variable name.
    pub fn next_name(&self) -> String {
        format!("_{}", self.next_index())
    }

    /// The value the next call to `next_index` would return (if uncontended).
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for NameSequence {
    fn default() -> Self {
        Self::new()
    }
}
