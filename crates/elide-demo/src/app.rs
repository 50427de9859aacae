#![forbid(unsafe_code)]

//! Demo application state and drawing.
//!
//! Terminal-free: events come in as [`DemoEvent`]s and frames go out into a
//! [`Buffer`], so everything here runs under plain unit tests.

use std::time::{Duration, Instant};

use elide::{
    Buffer, CellAttrs, DebounceConfig, ElideConfig, ElidedText, FlowLayout, LifecycleHooks, Node,
    Rect, Size, Widget,
};
use tracing::debug;

use crate::cli::Opts;

/// Idle poll timeout when nothing is scheduled.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

const TITLE: &str = "elide demo  q quit  +/- width  [/] height  hover for tooltip";

/// Input the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoEvent {
    Quit,
    /// The terminal changed size.
    Resize(Size),
    /// The pointer moved to a cell.
    Hover { x: u16, y: u16 },
    Widen,
    Narrow,
    Taller,
    Shorter,
}

/// Whether the event loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The demo: one [`ElidedText`] in a framed box.
#[derive(Debug)]
pub struct DemoApp {
    widget: ElidedText<FlowLayout>,
    terminal: Size,
    width: Option<u16>,
    height: u16,
    hover: Option<(u16, u16)>,
}

impl DemoApp {
    /// Build the demo for a terminal of `terminal` cells. The widget starts
    /// detached.
    #[must_use]
    pub fn new(opts: &Opts, terminal: Size) -> Self {
        let mut config = ElideConfig::default().ellipsis(opts.ellipsis.clone());
        if opts.debounce_ms > 0 {
            config = config.debounce(DebounceConfig::new(Duration::from_millis(opts.debounce_ms)));
        }
        let inner = inner_rect(terminal, opts.width, opts.height);
        let widget = ElidedText::with_config(
            vec![Node::text(opts.text.clone())],
            FlowLayout::new(inner.size()),
            config,
        );
        Self {
            widget,
            terminal,
            width: opts.width,
            height: opts.height,
            hover: None,
        }
    }

    /// The widget.
    #[must_use]
    pub fn widget(&self) -> &ElidedText<FlowLayout> {
        &self.widget
    }

    /// Area the widget is drawn into.
    #[must_use]
    pub fn inner(&self) -> Rect {
        inner_rect(self.terminal, self.width, self.height)
    }

    /// Attach the widget: first fit.
    pub fn attach(&mut self) {
        self.widget.on_attach();
    }

    /// Detach the widget: content restored.
    pub fn detach(&mut self) {
        self.widget.on_detach();
    }

    /// Apply one event received at `now`.
    pub fn handle(&mut self, event: DemoEvent, now: Instant) -> Control {
        match event {
            DemoEvent::Quit => return Control::Exit,
            DemoEvent::Resize(size) => {
                debug!(width = size.width, height = size.height, "terminal resized");
                self.terminal = size;
            }
            DemoEvent::Hover { x, y } => {
                self.hover = Some((x, y));
                return Control::Continue;
            }
            DemoEvent::Widen => {
                let current = self.inner().width;
                self.width = Some(current.saturating_add(1));
            }
            DemoEvent::Narrow => {
                let current = self.inner().width;
                self.width = Some(current.saturating_sub(1));
            }
            DemoEvent::Taller => self.height = self.height.saturating_add(1),
            DemoEvent::Shorter => self.height = self.height.saturating_sub(1),
        }
        let size = self.inner().size();
        self.widget.resize_at(size, now);
        Control::Continue
    }

    /// Run a debounced fit if one is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.widget.poll(now)
    }

    /// How long the event loop may block.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.widget
            .time_until_due(now)
            .map_or(IDLE_TIMEOUT, |due| due.min(IDLE_TIMEOUT))
    }

    /// Whether the pointer rests on the widget.
    #[must_use]
    pub fn hovering(&self) -> bool {
        self.hover.is_some_and(|(x, y)| self.inner().contains(x, y))
    }

    /// Status line text.
    #[must_use]
    pub fn status(&self) -> String {
        if self.hovering()
            && let Some(tooltip) = self.widget.tooltip()
        {
            return format!("tooltip: {tooltip}");
        }
        let inner = self.inner();
        match self.widget.last_outcome() {
            Some(outcome) if outcome.skipped => format!("{}x{} box has no size", inner.width, inner.height),
            Some(outcome) => format!(
                "{}x{} trimmed: {}  words removed: {}  fits run: {}",
                inner.width,
                inner.height,
                if outcome.did_trim { "yes" } else { "no" },
                outcome.words_removed,
                self.widget.fit_cycles(),
            ),
            None => format!("{}x{} waiting", inner.width, inner.height),
        }
    }

    /// Draw a full frame.
    pub fn draw(&self, buf: &mut Buffer) {
        buf.clear();
        let screen = buf.bounds();
        let (body, status_row) = screen.split_bottom(1);

        buf.set_string(0, 0, TITLE, CellAttrs::BOLD, screen.right());

        let inner = self.inner();
        if !inner.is_empty() {
            draw_frame(buf, frame_rect(inner), body);
            self.widget.render(inner.intersection(&body), buf);
        }

        let attrs = if self.hovering() && self.widget.tooltip().is_some() {
            CellAttrs::REVERSE
        } else {
            CellAttrs::DIM
        };
        buf.set_string(status_row.x, status_row.y, &self.status(), attrs, status_row.right());
    }
}

/// Widget area for a terminal of `terminal` cells: below the title row and a
/// frame line, clear of the status row.
#[must_use]
pub fn inner_rect(terminal: Size, width: Option<u16>, height: u16) -> Rect {
    let max_width = terminal.width.saturating_sub(4);
    let max_height = terminal.height.saturating_sub(4);
    let width = width.unwrap_or(max_width).min(max_width);
    Rect::new(2, 2, width, height.min(max_height))
}

fn frame_rect(inner: Rect) -> Rect {
    Rect::new(
        inner.x.saturating_sub(1),
        inner.y.saturating_sub(1),
        inner.width.saturating_add(2),
        inner.height.saturating_add(2),
    )
}

/// Box-drawing border around `rect`, clipped to `clip`.
fn draw_frame(buf: &mut Buffer, rect: Rect, clip: Rect) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let max_x = rect.right().min(clip.right());
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    let plain = CellAttrs::empty();

    for x in rect.x..rect.right() {
        let (top, low) = if x == rect.x {
            ("┌", "└")
        } else if x == right {
            ("┐", "┘")
        } else {
            ("─", "─")
        };
        if clip.contains(x, rect.y) {
            buf.set_string(x, rect.y, top, plain, max_x);
        }
        if clip.contains(x, bottom) {
            buf.set_string(x, bottom, low, plain, max_x);
        }
    }
    for y in rect.y + 1..bottom {
        for x in [rect.x, right] {
            if clip.contains(x, y) {
                buf.set_string(x, y, "│", plain, max_x);
            }
        }
    }
}
