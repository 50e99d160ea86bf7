//! Cooperative wall-clock budget for a single search.

use std::time::{Duration, Instant};

/// A wall-clock deadline polled at bounded granularity during scans.
///
/// Cancellation is cooperative: the retriever and verifier check elapsed
/// time at fixed intervals, so overrun past the deadline stays small and
/// behavior stays deterministic. There is no background timer thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline expiring `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Deadline {
            expires_at: Instant::now().checked_add(budget),
        }
    }

    /// A deadline that never expires.
    pub fn none() -> Self {
        Deadline { expires_at: None }
    }

    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }
}
