#![forbid(unsafe_code)]

//! Debouncing for high-frequency size-change notifications.
//!
//! A host may deliver resize notifications at a very high rate (for example
//! while the user drags a window edge). Each notification asks for a full
//! re-fit from pristine content, so a burst of them is wasted work for every
//! notification except the last.
//!
//! [`ResizeDebouncer`] collapses a burst into a single pending notification:
//! - **Latest wins**: notifications carry no payload, so any number of them
//!   collapse into one pending fit.
//! - **Quiet period**: the pending fit fires once no notification arrived for
//!   [`DebounceConfig::delay`].
//! - **Bounded latency**: the pending fit fires at the latest
//!   [`DebounceConfig::hard_deadline`] after the first notification of the
//!   burst, even if notifications keep arriving.
//!
//! The debouncer never decides *what* the fitted result is, only *when* the
//! fit runs, so the equilibrium state is the same as without debouncing.
//!
//! # Usage
//!
//! ```
//! use elide_core::debounce::{DebounceConfig, ResizeDebouncer};
//! use std::time::{Duration, Instant};
//!
//! let mut debouncer = ResizeDebouncer::new(DebounceConfig::default());
//! let t0 = Instant::now();
//!
//! debouncer.notify(t0);
//! debouncer.notify(t0 + Duration::from_millis(5));
//! assert!(!debouncer.poll(t0 + Duration::from_millis(10)));
//!
//! // Quiet for longer than the delay: exactly one fit fires.
//! assert!(debouncer.poll(t0 + Duration::from_millis(60)));
//! assert!(!debouncer.poll(t0 + Duration::from_millis(70)));
//! ```

use std::time::{Duration, Instant};

/// Timing parameters for [`ResizeDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period after the latest notification before the fit runs.
    pub delay: Duration,
    /// Maximum time a burst may postpone the fit.
    pub hard_deadline: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(16),
            hard_deadline: Duration::from_millis(100),
        }
    }
}

impl DebounceConfig {
    /// Create a config with the given quiet period and the default deadline.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Set the hard deadline.
    #[must_use]
    pub fn hard_deadline(mut self, deadline: Duration) -> Self {
        self.hard_deadline = deadline;
        self
    }
}

/// Pending burst bookkeeping.
#[derive(Debug, Clone, Copy)]
struct Pending {
    first: Instant,
    last: Instant,
    count: u32,
}

/// Collapses bursts of size-change notifications into single fits.
///
/// Not thread-safe; owned by the widget it schedules.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    config: DebounceConfig,
    pending: Option<Pending>,
    coalesced: u64,
}

impl ResizeDebouncer {
    /// Create a debouncer with the given timing.
    #[must_use]
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            pending: None,
            coalesced: 0,
        }
    }

    /// The timing parameters.
    #[must_use]
    pub fn config(&self) -> DebounceConfig {
        self.config
    }

    /// Record a notification received at `now`.
    pub fn notify(&mut self, now: Instant) {
        self.pending = Some(match self.pending {
            Some(pending) => {
                self.coalesced = self.coalesced.saturating_add(1);
                Pending {
                    last: now,
                    count: pending.count.saturating_add(1),
                    ..pending
                }
            }
            None => Pending {
                first: now,
                last: now,
                count: 1,
            },
        });
    }

    /// Returns `true` (and clears the pending state) when the pending fit is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };

        let quiet = now.saturating_duration_since(pending.last) >= self.config.delay;
        let overdue = now.saturating_duration_since(pending.first) >= self.config.hard_deadline;
        if quiet || overdue {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Time until the pending fit becomes due, or `None` when nothing is pending.
    ///
    /// Hosts use this as their event-poll timeout.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        let pending = self.pending?;
        let quiet_at = pending.last + self.config.delay;
        let deadline_at = pending.first + self.config.hard_deadline;
        Some(quiet_at.min(deadline_at).saturating_duration_since(now))
    }

    /// Check if a fit is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of notifications in the current pending burst.
    #[must_use]
    pub fn pending_count(&self) -> u32 {
        self.pending.map(|p| p.count).unwrap_or(0)
    }

    /// Total notifications absorbed into an earlier pending one.
    #[must_use]
    pub fn coalesced_total(&self) -> u64 {
        self.coalesced
    }

    /// Discard any pending notification without running it.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
