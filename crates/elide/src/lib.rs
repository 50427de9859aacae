#![forbid(unsafe_code)]

//! elide public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! lightweight prelude.
//!
//! # Example
//! ```
//! use elide::prelude::*;
//!
//! let mut widget = elide::elided("Hello big world", Size::new(12, 1));
//! widget.on_attach();
//! assert_eq!(text_content(widget.children()), "Hello ...");
//! assert_eq!(widget.attribute("tooltip"), Some("Hello big world"));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use elide_core::debounce::{DebounceConfig, ResizeDebouncer};
pub use elide_core::geometry::{Rect, Size};

// --- Text and layout re-exports --------------------------------------------

pub use elide_layout::{
    BoxMetrics, Element, Flow, FlowLayout, Input, InputKind, Measure, Node, OverflowProbe,
    REFERENCE_GLYPHS, text_content,
};
pub use elide_text::remove_last_word;

// --- Render re-exports -----------------------------------------------------

pub use elide_render::{Buffer, Cell, CellAttrs, CellContent};

// --- Widget re-exports -----------------------------------------------------

pub use elide_widgets::{
    AnchorSearch, ContentSnapshot, ElideConfig, ElidedText, FitOutcome, LifecycleHooks,
    ManualObserver, ObserveError, Phase, ResizeReactor, SizeObserver, Unobserved, Widget, fit,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for elide hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Terminal error with message.
    Terminal(String),
    /// Size observation failure.
    Observe(ObserveError),
    /// Log subscriber could not be installed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Terminal(msg) | Self::Logging(msg) => write!(f, "{msg}"),
            Self::Observe(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Observe(err) => Some(err),
            Self::Terminal(_) | Self::Logging(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ObserveError> for Error {
    fn from(err: ObserveError) -> Self {
        Self::Observe(err)
    }
}

/// Standard result type for elide APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// A detached widget showing `text` in a box of `size`, laid out by
/// [`FlowLayout`].
#[must_use]
pub fn elided(text: &str, size: Size) -> ElidedText<FlowLayout> {
    ElidedText::new(vec![Node::text(text)], FlowLayout::new(size))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Buffer, ElideConfig, ElidedText, Error, FlowLayout, Input, LifecycleHooks, Measure, Node,
        Rect, Result, Size, Widget, text_content,
    };

    pub use crate::{core, layout, render, text, widgets};
}

pub use elide_core as core;
pub use elide_layout as layout;
pub use elide_render as render;
pub use elide_text as text;
pub use elide_widgets as widgets;
