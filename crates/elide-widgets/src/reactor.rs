#![forbid(unsafe_code)]

//! Size-change observation and lifecycle scheduling.
//!
//! The host owns the actual size-notification primitive. A widget reaches it
//! through [`SizeObserver`] and is driven by the host through
//! [`LifecycleHooks`]. [`ResizeReactor`] holds the lifecycle [`Phase`] and
//! decides when a notification turns into a fit cycle.
//!
//! # State machine
//!
//! ```text
//! Detached --on_attach--> Attached { reactive }
//! Attached --on_resize--> Attached           (fit cycle when reactive)
//! Attached --on_detach--> Detached
//! ```
//!
//! An observer that fails to start leaves the widget attached but not
//! reactive: it was fitted once and keeps that result.

use std::fmt;
use std::time::{Duration, Instant};

use elide_core::debounce::{DebounceConfig, ResizeDebouncer};
use tracing::{debug, trace, warn};

/// Errors from a [`SizeObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveError {
    /// The host has no size-notification facility.
    Unsupported,
    /// `disconnect` was called while not observing.
    NotObserving,
    /// The host facility failed.
    Host(String),
}

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "size observation is not supported by this host"),
            Self::NotObserving => write!(f, "size observer is not observing"),
            Self::Host(msg) => write!(f, "size observer failed: {msg}"),
        }
    }
}

impl std::error::Error for ObserveError {}

/// The host's size-change notification facility.
pub trait SizeObserver {
    /// Start delivering size-change notifications.
    fn observe(&mut self) -> Result<(), ObserveError>;

    /// Stop delivering notifications.
    fn disconnect(&mut self) -> Result<(), ObserveError>;
}

/// Observer for hosts that forward size changes by calling
/// [`LifecycleHooks::on_resize`] themselves, as an event loop does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualObserver {
    observing: bool,
}

impl ManualObserver {
    /// A stopped observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether notifications are currently expected.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observing
    }
}

impl SizeObserver for ManualObserver {
    fn observe(&mut self) -> Result<(), ObserveError> {
        self.observing = true;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), ObserveError> {
        if !self.observing {
            return Err(ObserveError::NotObserving);
        }
        self.observing = false;
        Ok(())
    }
}

/// Observer for hosts without size notifications. `observe` always fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unobserved;

impl SizeObserver for Unobserved {
    fn observe(&mut self) -> Result<(), ObserveError> {
        Err(ObserveError::Unsupported)
    }

    fn disconnect(&mut self) -> Result<(), ObserveError> {
        Err(ObserveError::NotObserving)
    }
}

/// Host-driven lifecycle of a widget.
pub trait LifecycleHooks {
    /// The widget became part of the live tree.
    fn on_attach(&mut self);

    /// The widget left the live tree.
    fn on_detach(&mut self);

    /// The widget's box changed size.
    fn on_resize(&mut self);
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Not in the live tree. The initial and final phase.
    #[default]
    Detached,
    /// In the live tree. `reactive` is false when the observer could not start.
    Attached { reactive: bool },
}

impl Phase {
    /// Whether the widget is in the live tree.
    #[must_use]
    pub fn is_attached(self) -> bool {
        matches!(self, Self::Attached { .. })
    }

    /// Whether size changes trigger fit cycles.
    #[must_use]
    pub fn is_reactive(self) -> bool {
        matches!(self, Self::Attached { reactive: true })
    }
}

/// Lifecycle phase plus resize scheduling for one widget.
#[derive(Debug)]
pub struct ResizeReactor<O> {
    observer: O,
    phase: Phase,
    debouncer: Option<ResizeDebouncer>,
}

impl<O: SizeObserver> ResizeReactor<O> {
    /// A detached reactor. With `debounce`, notifications are coalesced
    /// and fits become due through [`ResizeReactor::poll`].
    #[must_use]
    pub fn new(observer: O, debounce: Option<DebounceConfig>) -> Self {
        Self {
            observer,
            phase: Phase::Detached,
            debouncer: debounce.map(ResizeDebouncer::new),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Enter the attached phase and start observing.
    ///
    /// An observer failure is logged; the widget stays attached without
    /// reacting to size changes.
    pub fn attach(&mut self) -> Phase {
        let reactive = match self.observer.observe() {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "size observer unavailable; widget will not re-fit on resize");
                false
            }
        };
        self.phase = Phase::Attached { reactive };
        debug!(reactive, "attached");
        self.phase
    }

    /// Stop observing, drop any pending notification, and enter the
    /// detached phase. An observer failure is logged and otherwise ignored.
    pub fn detach(&mut self) {
        if self.phase.is_reactive()
            && let Err(err) = self.observer.disconnect()
        {
            warn!(error = %err, "size observer failed to disconnect");
        }
        if let Some(debouncer) = &mut self.debouncer {
            debouncer.clear();
        }
        self.phase = Phase::Detached;
        debug!("detached");
    }

    /// Record a size change at `now`. Returns `true` when a fit cycle should
    /// run immediately.
    pub fn notify(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Detached => {
                trace!("resize ignored: detached");
                false
            }
            Phase::Attached { reactive: false } => {
                trace!("resize ignored: not observing");
                false
            }
            Phase::Attached { reactive: true } => match &mut self.debouncer {
                None => true,
                Some(debouncer) => {
                    debouncer.notify(now);
                    debouncer.poll(now)
                }
            },
        }
    }

    /// Returns `true` when a debounced fit cycle is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.phase.is_reactive() {
            return false;
        }
        self.debouncer
            .as_mut()
            .is_some_and(|debouncer| debouncer.poll(now))
    }

    /// Time until a pending debounced fit is due.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.as_ref()?.time_until_due(now)
    }

    /// Whether a debounced fit is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.debouncer.as_ref().is_some_and(ResizeDebouncer::has_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Observer whose calls fail on demand.
    #[derive(Debug, Default)]
    struct Flaky {
        fail_observe: bool,
        fail_disconnect: bool,
        disconnects: usize,
    }

    impl SizeObserver for Flaky {
        fn observe(&mut self) -> Result<(), ObserveError> {
            if self.fail_observe {
                Err(ObserveError::Host("observer construction failed".into()))
            } else {
                Ok(())
            }
        }

        fn disconnect(&mut self) -> Result<(), ObserveError> {
            self.disconnects += 1;
            if self.fail_disconnect {
                Err(ObserveError::Host("already torn down".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn manual_observer_tracks_state() {
        let mut observer = ManualObserver::new();
        assert_eq!(observer.disconnect(), Err(ObserveError::NotObserving));
        assert_eq!(observer.observe(), Ok(()));
        assert!(observer.is_observing());
        assert_eq!(observer.disconnect(), Ok(()));
        assert!(!observer.is_observing());
    }

    #[test]
    fn attach_then_detach() {
        let mut reactor = ResizeReactor::new(ManualObserver::new(), None);
        assert_eq!(reactor.phase(), Phase::Detached);
        assert_eq!(reactor.attach(), Phase::Attached { reactive: true });
        assert!(reactor.observer().is_observing());
        reactor.detach();
        assert_eq!(reactor.phase(), Phase::Detached);
        assert!(!reactor.observer().is_observing());
    }

    #[test]
    fn notifications_ignored_while_detached() {
        let mut reactor = ResizeReactor::new(ManualObserver::new(), None);
        assert!(!reactor.notify(Instant::now()));
    }

    #[test]
    fn undebounced_notification_fires_immediately() {
        let mut reactor = ResizeReactor::new(ManualObserver::new(), None);
        reactor.attach();
        assert!(reactor.notify(Instant::now()));
        assert!(!reactor.poll(Instant::now()));
    }

    #[test]
    fn failed_observe_leaves_widget_inert() {
        let observer = Flaky {
            fail_observe: true,
            ..Flaky::default()
        };
        let mut reactor = ResizeReactor::new(observer, None);
        assert_eq!(reactor.attach(), Phase::Attached { reactive: false });
        assert!(!reactor.notify(Instant::now()));

        reactor.detach();
        assert_eq!(reactor.observer().disconnects, 0);
        assert_eq!(reactor.phase(), Phase::Detached);
    }

    #[test]
    fn unobserved_host_is_not_reactive() {
        let mut reactor = ResizeReactor::new(Unobserved, None);
        assert!(!reactor.attach().is_reactive());
        reactor.detach();
        assert_eq!(reactor.phase(), Phase::Detached);
    }

    #[test]
    fn failed_disconnect_still_detaches() {
        let observer = Flaky {
            fail_disconnect: true,
            ..Flaky::default()
        };
        let mut reactor = ResizeReactor::new(observer, None);
        reactor.attach();
        reactor.detach();
        assert_eq!(reactor.observer().disconnects, 1);
        assert_eq!(reactor.phase(), Phase::Detached);
    }

    #[test]
    fn debounced_burst_fires_once() {
        let config = DebounceConfig::new(Duration::from_millis(20));
        let mut reactor = ResizeReactor::new(ManualObserver::new(), Some(config));
        reactor.attach();

        let t0 = Instant::now();
        for ms in [0, 5, 10, 15] {
            assert!(!reactor.notify(t0 + Duration::from_millis(ms)));
        }
        assert!(reactor.has_pending());
        assert_eq!(
            reactor.time_until_due(t0 + Duration::from_millis(15)),
            Some(Duration::from_millis(20))
        );
        assert!(!reactor.poll(t0 + Duration::from_millis(30)));
        assert!(reactor.poll(t0 + Duration::from_millis(35)));
        assert!(!reactor.poll(t0 + Duration::from_millis(80)));
    }

    #[test]
    fn detach_drops_pending_notification() {
        let config = DebounceConfig::new(Duration::from_millis(20));
        let mut reactor = ResizeReactor::new(ManualObserver::new(), Some(config));
        reactor.attach();
        let t0 = Instant::now();
        reactor.notify(t0);
        reactor.detach();
        assert!(!reactor.has_pending());
        assert!(!reactor.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn zero_delay_debounce_fires_on_notify() {
        let config = DebounceConfig::new(Duration::ZERO);
        let mut reactor = ResizeReactor::new(ManualObserver::new(), Some(config));
        reactor.attach();
        assert!(reactor.notify(Instant::now()));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ObserveError::Host("boom".into()).to_string(),
            "size observer failed: boom"
        );
        assert!(ObserveError::Unsupported.to_string().contains("not supported"));
    }
}
