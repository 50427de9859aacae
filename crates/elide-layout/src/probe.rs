#![forbid(unsafe_code)]

//! Overflow detection.
//!
//! A [`Measure`] reports the box a piece of content would occupy, in the
//! same terms a browser reports `client*` and `scroll*` extents. The
//! [`OverflowProbe`] compares those extents.
//!
//! Vertical overflow is judged against a *minimum height* instead of the
//! box's nominal height: the scroll height of a short reference glyph
//! sequence rendered alone in the same box. A box shorter than one line of
//! text would otherwise report overflow for any content at all.

use elide_core::geometry::Size;

use crate::node::Node;

/// Reference glyphs used to calibrate the minimum height.
///
/// Mixes a capital with a diacritic and descenders so the sample spans the
/// full line box.
pub const REFERENCE_GLYPHS: &str = "ÀEIOUhy";

/// Rendered extents of a box and its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxMetrics {
    /// Visible box size.
    pub client: Size,
    /// Size required by the content, never smaller than `client`.
    pub scroll: Size,
}

impl BoxMetrics {
    /// Whether the box has a visible extent on both axes.
    ///
    /// Fitting against a box without size is meaningless: there is no
    /// target to shrink to.
    #[inline]
    #[must_use]
    pub fn has_size(&self) -> bool {
        !self.client.is_empty()
    }
}

/// A layout engine able to measure content inside the current box.
///
/// This is the seam to the host's rendering surface: the fitter only ever
/// asks "how big is this content in your box?".
pub trait Measure {
    /// The current box size.
    fn viewport(&self) -> Size;

    /// Change the box size (the host's element was resized).
    fn set_viewport(&mut self, size: Size);

    /// Measure `content` laid out inside the current box.
    fn measure(&mut self, content: &[Node]) -> BoxMetrics;
}

impl<M: Measure + ?Sized> Measure for &mut M {
    fn viewport(&self) -> Size {
        (**self).viewport()
    }

    fn set_viewport(&mut self, size: Size) {
        (**self).set_viewport(size);
    }

    fn measure(&mut self, content: &[Node]) -> BoxMetrics {
        (**self).measure(content)
    }
}

/// Decides whether content outgrew its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowProbe {
    min_height: u16,
}

impl OverflowProbe {
    /// Create a probe with a known minimum height.
    #[must_use]
    pub const fn new(min_height: u16) -> Self {
        Self { min_height }
    }

    /// Calibrate the minimum height by measuring `reference` alone in the
    /// measure's current box.
    pub fn calibrate<M: Measure + ?Sized>(measure: &mut M, reference: &str) -> Self {
        let sample = [Node::text(reference)];
        Self::new(measure.measure(&sample).scroll.height)
    }

    /// The calibrated minimum height.
    #[must_use]
    pub const fn min_height(&self) -> u16 {
        self.min_height
    }

    /// Whether `metrics` show overflow on either axis.
    #[must_use]
    pub fn overflows(&self, metrics: &BoxMetrics) -> bool {
        metrics.scroll.width > metrics.client.width || metrics.scroll.height > self.min_height
    }

    /// Measure `content` and report whether it overflows.
    pub fn check<M: Measure + ?Sized>(&self, measure: &mut M, content: &[Node]) -> bool {
        self.overflows(&measure.measure(content))
    }
}
