#![forbid(unsafe_code)]

//! Widgets for elide.
//!
//! - [`ElidedText`] - text that trims itself to its box with an ellipsis
//! - [`fit`] - the word-removal pass on its own
//! - [`ContentSnapshot`] - pristine content a fit restarts from
//! - [`ResizeReactor`] - lifecycle phase and resize scheduling

pub mod config;
pub mod elided;
pub mod fitter;
pub mod reactor;
pub mod snapshot;

pub use config::{AnchorSearch, DEFAULT_ELLIPSIS, DEFAULT_TOOLTIP_ATTR, ElideConfig};
pub use elided::ElidedText;
pub use fitter::{FitOutcome, fit};
pub use reactor::{
    LifecycleHooks, ManualObserver, ObserveError, Phase, ResizeReactor, SizeObserver, Unobserved,
};
pub use snapshot::ContentSnapshot;

use elide_core::geometry::Rect;
use elide_layout::{Flow, FragmentKind, InputKind};
use elide_render::{Buffer, CellAttrs};

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Buffer` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Draw laid-out content into `area`, clipping anything outside it.
///
/// Inputs are drawn as bracketed boxes: a text field or area shows its value
/// (or a dimmed placeholder), a select shows its first option and an arrow.
pub fn draw_content(flow: &Flow, area: Rect, buf: &mut Buffer) {
    let max_x = area.right();
    for fragment in &flow.fragments {
        let (Ok(dx), Ok(dy)) = (u16::try_from(fragment.x), u16::try_from(fragment.y)) else {
            continue;
        };
        let x = area.x.saturating_add(dx);
        let y = area.y.saturating_add(dy);
        if x >= max_x || y >= area.bottom() {
            continue;
        }

        match &fragment.kind {
            FragmentKind::Word(word) => {
                buf.set_string(x, y, word, CellAttrs::empty(), max_x);
            }
            FragmentKind::Input {
                kind,
                label,
                is_placeholder,
            } => {
                let width = u16::try_from(fragment.width).unwrap_or(u16::MAX);
                let height = u16::try_from(fragment.height).unwrap_or(u16::MAX);
                let right = x.saturating_add(width).min(max_x);
                let attrs = if *is_placeholder {
                    CellAttrs::DIM
                } else {
                    CellAttrs::empty()
                };
                for row in 0..height {
                    let row_y = y.saturating_add(row);
                    if row_y >= area.bottom() {
                        break;
                    }
                    let label = (row == 0).then_some(label.as_str());
                    draw_input_row(buf, x, row_y, right, width, *kind, label, attrs);
                }
            }
        }
    }
}

/// One row of an input box spanning `x..x + width`, clipped at `right`.
#[allow(clippy::too_many_arguments)]
fn draw_input_row(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    right: u16,
    width: u16,
    kind: InputKind,
    label: Option<&str>,
    attrs: CellAttrs,
) {
    if width < 2 {
        return;
    }
    let last = x.saturating_add(width - 1);
    buf.set_string(x, y, "[", CellAttrs::empty(), right);
    let inner_end = match kind {
        InputKind::Select => last.saturating_sub(2),
        InputKind::Text | InputKind::TextArea => last,
    };
    if let Some(label) = label {
        buf.set_string(x + 1, y, label, attrs | CellAttrs::UNDERLINE, inner_end.min(right));
    }
    if kind == InputKind::Select {
        buf.set_string(inner_end.saturating_add(1), y, "v", CellAttrs::empty(), right);
    }
    buf.set_string(last, y, "]", CellAttrs::empty(), right);
}
