//! Process-unique element identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identifier for one laid-out element.
///
/// Identifiers are allocated from a process-wide counter and never reused,
/// so ids from successive rebuilds can never collide with each other. The
/// allocator is independent of any rendering surface; surfaces adopt ids
/// chosen by their callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocates the next process-unique identifier.
    pub fn next() -> Self {
        ElementId(LAST_ID.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}
