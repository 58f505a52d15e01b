//! Cooperative debouncing for rapidly changing input.
//!
//! [`Debouncer`] holds at most one pending settle: a value plus the
//! deadline at which it becomes final. Scheduling a new value cancels the
//! pending one. The owner polls with the current [`Instant`] from its event
//! loop; nothing runs in the background.

use std::time::{Duration, Instant};

/// Default quiet period before search text settles.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// A value waiting for its quiet period to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Delays a value until it has stopped changing for a quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// The configured quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedules `value` to settle one quiet period after `now`, replacing
    /// any pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
    }

    /// Drops the pending value, if any, and returns it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Returns the pending value once its deadline has passed.
    ///
    /// Each scheduled value settles at most once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now >= p.deadline);
        if due { self.cancel() } else { None }
    }

    /// Whether a value is waiting to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will settle.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
