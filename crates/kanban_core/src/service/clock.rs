//! Strictly increasing millisecond clock for entity timestamps.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock that never repeats or goes backwards.
///
/// Two calls in the same millisecond yield `t` and `t + 1`, so
/// newest-first ordering by timestamp is always total.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_ms: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next timestamp in Unix epoch milliseconds.
    pub fn now_ms(&self) -> i64 {
        let wall = wall_clock_ms();
        let mut previous = self.last_ms.load(Ordering::Acquire);
        loop {
            let next = wall.max(previous.saturating_add(1));
            match self.last_ms.compare_exchange_weak(
                previous,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(actual) => previous = actual,
            }
        }
    }
}

fn wall_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
