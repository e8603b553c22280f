//! Clock abstraction for deterministic timing.
//!
//! The application layer never reads the time itself; the plugin shell asks a
//! [`Clock`] for `now` and passes it into every event. Production uses
//! [`SystemClock`], tests use [`ManualClock`] to walk through the notification
//! and latency timing without sleeping.
//!
//! # Invariants
//!
//! - Monotonicity: `now()` never goes backwards.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    /// Returns the current time. Must never decrease between calls.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests and replays.
///
/// Starts at the instant it was created and only moves when told to.
///
/// # Example
///
/// ```rust
/// use cipherdeck::infrastructure::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(4000));
/// assert_eq!(clock.now() - start, Duration::from_millis(4000));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}
