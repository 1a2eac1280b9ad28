//! Timestamp capture behind a trait so loops and submissions are testable
//! without real time.

use chrono::Utc;

/// Source of unix-second timestamps.
///
/// The submission handler and the rating producer stamp every record they
/// write; injecting the clock keeps those paths deterministic under test.
pub trait Clock: Send + Sync {
    /// Current time as unix seconds
    fn now_unix(&self) -> i64;
}

/// Wall-clock implementation used outside of tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}
