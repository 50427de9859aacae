#![forbid(unsafe_code)]

//! Widget configuration.

use elide_core::debounce::DebounceConfig;
use elide_layout::REFERENCE_GLYPHS;

/// Marker appended to truncated content.
pub const DEFAULT_ELLIPSIS: &str = " ...";

/// Attribute holding the full text once content was truncated.
pub const DEFAULT_TOOLTIP_ATTR: &str = "tooltip";

/// Where the ellipsis is anchored after a trimming pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnchorSearch {
    /// Last text node anywhere in the tree, descending into elements.
    #[default]
    Recursive,
    /// Last text node among the top-level children only. Text inside
    /// elements is never chosen.
    Flat,
}

/// Configuration for [`ElidedText`](crate::ElidedText) and [`fit`](crate::fit).
///
/// # Example
/// ```
/// use elide_widgets::{AnchorSearch, ElideConfig};
/// use elide_core::debounce::DebounceConfig;
/// use std::time::Duration;
///
/// let config = ElideConfig::new()
///     .ellipsis("…")
///     .anchor(AnchorSearch::Flat)
///     .debounce(DebounceConfig::new(Duration::from_millis(30)));
/// assert_eq!(config.ellipsis, "…");
/// assert!(config.debounce.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElideConfig {
    /// Appended to the anchor text when content was trimmed.
    pub ellipsis: String,
    /// Sample text whose rendered height sets the vertical overflow threshold.
    pub reference_glyphs: String,
    /// Ellipsis anchor search.
    pub anchor: AnchorSearch,
    /// Optional debouncing of size-change notifications.
    pub debounce: Option<DebounceConfig>,
    /// Name of the tooltip attribute.
    pub tooltip_attr: String,
}

impl Default for ElideConfig {
    fn default() -> Self {
        Self {
            ellipsis: DEFAULT_ELLIPSIS.to_owned(),
            reference_glyphs: REFERENCE_GLYPHS.to_owned(),
            anchor: AnchorSearch::default(),
            debounce: None,
            tooltip_attr: DEFAULT_TOOLTIP_ATTR.to_owned(),
        }
    }
}

impl ElideConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ellipsis marker.
    #[must_use]
    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Set the reference glyphs used to calibrate the minimum height.
    #[must_use]
    pub fn reference_glyphs(mut self, glyphs: impl Into<String>) -> Self {
        self.reference_glyphs = glyphs.into();
        self
    }

    /// Set the ellipsis anchor search.
    #[must_use]
    pub fn anchor(mut self, anchor: AnchorSearch) -> Self {
        self.anchor = anchor;
        self
    }

    /// Enable debouncing of size-change notifications.
    #[must_use]
    pub fn debounce(mut self, debounce: DebounceConfig) -> Self {
        self.debounce = Some(debounce);
        self
    }

    /// Set the tooltip attribute name.
    #[must_use]
    pub fn tooltip_attr(mut self, name: impl Into<String>) -> Self {
        self.tooltip_attr = name.into();
        self
    }
}
