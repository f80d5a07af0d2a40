//! Injectable time source.
//!
//! Every reference-time read in the crate goes through [`Clock`] so that the
//! countdown formatter, the normalizer and the refetch scheduler can be
//! tested against simulated time instead of the wall clock.

use chrono::{DateTime, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync + 'static {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
