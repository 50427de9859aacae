#![forbid(unsafe_code)]

//! The self-truncating text widget.

use std::time::{Duration, Instant};

use elide_core::geometry::{Rect, Size};
use elide_layout::{FlowLayout, Measure, Node};
use elide_render::Buffer;
use tracing::{debug, debug_span};

use crate::config::ElideConfig;
use crate::fitter::{FitOutcome, fit};
use crate::reactor::{LifecycleHooks, ManualObserver, Phase, ResizeReactor, SizeObserver};
use crate::snapshot::ContentSnapshot;
use crate::{Widget, draw_content};

/// Text content that trims itself word by word to fit its box, ending in an
/// ellipsis and exposing the full text as a tooltip.
///
/// Content is fitted when the host attaches the widget and again on every
/// size change while attached. Each fit starts from the content as
/// originally supplied, so growing the box brings words back.
///
/// # Example
/// ```
/// use elide_core::geometry::Size;
/// use elide_layout::{FlowLayout, Node, text_content};
/// use elide_widgets::{ElidedText, LifecycleHooks};
///
/// let mut widget = ElidedText::new(
///     vec![Node::text("Hello big world")],
///     FlowLayout::new(Size::new(12, 1)),
/// );
/// widget.on_attach();
/// assert_eq!(text_content(widget.children()), "Hello ...");
/// assert_eq!(widget.tooltip(), Some("Hello big world"));
///
/// widget.resize(Size::new(20, 1));
/// assert_eq!(text_content(widget.children()), "Hello big world");
/// assert_eq!(widget.tooltip(), None);
/// ```
#[derive(Debug)]
pub struct ElidedText<M, O = ManualObserver> {
    config: ElideConfig,
    measure: M,
    children: Vec<Node>,
    snapshot: Option<ContentSnapshot>,
    tooltip: Option<String>,
    outcome: Option<FitOutcome>,
    reactor: ResizeReactor<O>,
    fit_cycles: u64,
}

impl<M: Measure> ElidedText<M, ManualObserver> {
    /// A detached widget with default configuration, driven by the host's
    /// own resize events.
    #[must_use]
    pub fn new(content: Vec<Node>, measure: M) -> Self {
        Self::with_observer(content, measure, ManualObserver::new(), ElideConfig::default())
    }

    /// A detached widget with `config`.
    #[must_use]
    pub fn with_config(content: Vec<Node>, measure: M, config: ElideConfig) -> Self {
        Self::with_observer(content, measure, ManualObserver::new(), config)
    }
}

impl<M: Measure, O: SizeObserver> ElidedText<M, O> {
    /// A detached widget using `observer` for size notifications.
    #[must_use]
    pub fn with_observer(content: Vec<Node>, measure: M, observer: O, config: ElideConfig) -> Self {
        let reactor = ResizeReactor::new(observer, config.debounce);
        Self {
            config,
            measure,
            children: content,
            snapshot: None,
            tooltip: None,
            outcome: None,
            reactor,
            fit_cycles: 0,
        }
    }

    /// The live (possibly trimmed) children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The full original text, present only while content is trimmed.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Attribute lookup. Only the configured tooltip attribute exists.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if name == self.config.tooltip_attr {
            self.tooltip()
        } else {
            None
        }
    }

    /// Whether the latest fit removed anything.
    #[must_use]
    pub fn did_trim(&self) -> bool {
        self.outcome.is_some_and(|outcome| outcome.did_trim)
    }

    /// Minimum height calibrated by the latest fit.
    #[must_use]
    pub fn min_height(&self) -> Option<u16> {
        self.outcome.and_then(|outcome| outcome.min_height)
    }

    /// Result of the latest fit, cleared on detach.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&FitOutcome> {
        self.outcome.as_ref()
    }

    /// Number of fit cycles run since creation.
    #[must_use]
    pub fn fit_cycles(&self) -> u64 {
        self.fit_cycles
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.reactor.phase()
    }

    /// Original flattened text, while attached.
    #[must_use]
    pub fn original_text(&self) -> Option<&str> {
        self.snapshot.as_ref().map(ContentSnapshot::original_text)
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ElideConfig {
        &self.config
    }

    /// The measuring engine.
    #[must_use]
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Mutable access to the measuring engine. Changing its viewport here
    /// does not trigger a fit; use [`ElidedText::resize`] for that.
    pub fn measure_mut(&mut self) -> &mut M {
        &mut self.measure
    }

    /// The size observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        self.reactor.observer()
    }

    /// Set the box size and deliver a size-change notification.
    pub fn resize(&mut self, size: Size) {
        self.resize_at(size, Instant::now());
    }

    /// [`ElidedText::resize`] with an explicit timestamp.
    pub fn resize_at(&mut self, size: Size, now: Instant) {
        self.measure.set_viewport(size);
        self.on_resize_at(now);
    }

    /// Deliver a size-change notification received at `now`.
    pub fn on_resize_at(&mut self, now: Instant) {
        if self.reactor.notify(now) {
            self.fit_cycle();
        }
    }

    /// Run a debounced fit if one is due at `now`. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.reactor.poll(now) {
            self.fit_cycle();
            true
        } else {
            false
        }
    }

    /// Time until a debounced fit is due, for use as a poll timeout.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.reactor.time_until_due(now)
    }

    /// Restore pristine content, fit it, and update the tooltip.
    fn fit_cycle(&mut self) {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };
        let viewport = self.measure.viewport();
        let _span = debug_span!("fit_cycle", width = viewport.width, height = viewport.height)
            .entered();

        snapshot.restore(&mut self.children);
        let outcome = fit(&mut self.children, &mut self.measure, &self.config);
        self.tooltip = outcome
            .did_trim
            .then(|| snapshot.original_text().trim().to_owned());
        self.outcome = Some(outcome);
        self.fit_cycles += 1;
    }
}

impl<M: Measure, O: SizeObserver> LifecycleHooks for ElidedText<M, O> {
    fn on_attach(&mut self) {
        if self.phase().is_attached() {
            debug!("attach ignored: already attached");
            return;
        }
        self.snapshot = Some(ContentSnapshot::capture(&self.children));
        self.fit_cycle();
        self.reactor.attach();
    }

    fn on_detach(&mut self) {
        if !self.phase().is_attached() {
            debug!("detach ignored: not attached");
            return;
        }
        self.reactor.detach();
        if let Some(snapshot) = self.snapshot.take() {
            snapshot.restore(&mut self.children);
        }
        self.tooltip = None;
        self.outcome = None;
    }

    fn on_resize(&mut self) {
        self.on_resize_at(Instant::now());
    }
}

impl<M, O> Widget for ElidedText<M, O> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let _span = debug_span!(
            "widget_render",
            widget = "ElidedText",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let mut layout = FlowLayout::new(area.size());
        let flow = layout.layout(&self.children);
        draw_content(&flow, area, buf);
    }
}
