//! Wall-clock timing for estimate runs
//!
//! Elapsed time is always taken as an explicit end timestamp minus an explicit
//! start timestamp, both read after a group barrier.

use std::time::{Duration, Instant};

/// Monotonic point in time read by a worker after a barrier
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    instant: Instant,
}

impl Timestamp {
    #[inline]
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
        }
    }

    /// Time from `earlier` to this timestamp, zero if `earlier` is later
    #[inline]
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        self.instant.saturating_duration_since(earlier.instant)
    }

    /// Seconds from `earlier` to this timestamp, as reported to the user
    #[inline]
    pub fn seconds_since(&self, earlier: Timestamp) -> f64 {
        self.duration_since(earlier).as_secs_f64()
    }
}
