//! Application-side ID generation
//!
//! IDs are plain `i64`s minted by the application rather than the database,
//! so a whole write batch (command, approval request, audit entries) can be
//! wired together before anything is persisted.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Monotonic ID generator.
///
/// Produces strictly increasing `i64`s: milliseconds since the Unix epoch
/// shifted left 16 bits, plus a sequence number. The sequence spills into
/// the timestamp bits if more than 65536 IDs are minted in one millisecond,
/// which keeps ordering but borrows from future milliseconds. Safe to share
/// across tasks behind an `Arc`.
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Mint the next ID
    pub fn next_id(&self) -> i64 {
        let candidate = Utc::now().timestamp_millis() << 16;
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last + 1))
            })
            // The closure always returns Some, so fetch_update cannot fail
            .map(|last| candidate.max(last + 1))
            .unwrap_or(candidate)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
