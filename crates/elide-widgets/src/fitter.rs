#![forbid(unsafe_code)]

//! Word-by-word fitting of content into its box.
//!
//! [`fit`] walks the top-level children from last to first, removing
//! trailing words until the content no longer overflows, then appends an
//! ellipsis to the last remaining text node. When even the bare marker
//! overflows, that node goes and the marker moves to the text before it.
//!
//! # Invariants
//!
//! 1. Input nodes are never modified or removed.
//! 2. Surviving nodes keep their relative order.
//! 3. Between consecutive measurements the rendered extent never grows.
//! 4. The loop ends either fitting or with every non-input child consumed.
//! 5. With a box at least as wide as the ellipsis, the finished content fits
//!    or has no text node left to carry the marker.

use elide_layout::{Measure, Node, NodeKind, OverflowProbe};
use elide_text::remove_last_word;
use tracing::{debug, trace};

use crate::config::{AnchorSearch, ElideConfig};

/// What a [`fit`] pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitOutcome {
    /// Whether any content was removed.
    pub did_trim: bool,
    /// The box had no size; nothing was measured against it.
    pub skipped: bool,
    /// Calibrated minimum height, `None` when skipped.
    pub min_height: Option<u16>,
    /// Word-removal steps applied, ellipsis settling included.
    pub words_removed: usize,
    /// Nodes removed, emptied ellipsis carriers included.
    pub nodes_removed: usize,
    /// Layout measurements taken.
    pub measurements: usize,
    /// Whether an ellipsis was appended.
    pub ellipsis_appended: bool,
}

impl FitOutcome {
    /// Whether the content fits without any change.
    #[must_use]
    pub fn untouched(&self) -> bool {
        !self.did_trim
    }
}

/// Overflow checks with a measurement counter.
struct Gauge<'m, M: ?Sized> {
    measure: &'m mut M,
    probe: OverflowProbe,
    measurements: usize,
}

impl<M: Measure + ?Sized> Gauge<'_, M> {
    fn overflows(&mut self, content: &[Node]) -> bool {
        self.measurements += 1;
        self.probe.check(&mut *self.measure, content)
    }
}

/// Fit `children` into the box `measure` currently describes.
///
/// Modifies `children` in place. Callers wanting repeatable results start
/// every pass from pristine content, see
/// [`ContentSnapshot::restore`](crate::ContentSnapshot::restore).
///
/// # Example
/// ```
/// use elide_core::geometry::Size;
/// use elide_layout::{FlowLayout, Node, text_content};
/// use elide_widgets::{ElideConfig, fit};
///
/// let mut layout = FlowLayout::new(Size::new(12, 1));
/// let mut children = vec![Node::text("Hello big world")];
/// let outcome = fit(&mut children, &mut layout, &ElideConfig::default());
///
/// assert!(outcome.did_trim);
/// assert_eq!(text_content(&children), "Hello ...");
/// ```
pub fn fit<M: Measure + ?Sized>(
    children: &mut Vec<Node>,
    measure: &mut M,
    config: &ElideConfig,
) -> FitOutcome {
    let mut outcome = FitOutcome {
        measurements: 1,
        ..FitOutcome::default()
    };

    if !measure.measure(children).has_size() {
        debug!(viewport = ?measure.viewport(), "fit skipped: box has no size");
        outcome.skipped = true;
        return outcome;
    }

    let probe = OverflowProbe::calibrate(measure, &config.reference_glyphs);
    outcome.measurements += 1;
    outcome.min_height = Some(probe.min_height());

    let mut gauge = Gauge {
        measure,
        probe,
        measurements: 0,
    };

    let mut overflowing = gauge.overflows(children);
    let mut idx = children.len();
    while overflowing && idx > 0 {
        idx -= 1;
        match children[idx].kind() {
            NodeKind::Input => {
                trace!(index = idx, "skipping input");
            }
            NodeKind::Element if contains_input(&children[idx]) => {
                trace!(index = idx, "skipping element holding an input");
            }
            NodeKind::Break => {
                children.remove(idx);
                outcome.did_trim = true;
                outcome.nodes_removed += 1;
                trace!(index = idx, "removed break");
                overflowing = gauge.overflows(children);
            }
            NodeKind::Text | NodeKind::Element => {
                let original = children[idx].text_content();
                let lead = leading_space(&original);
                let mut words = original.as_str();
                loop {
                    words = remove_last_word(words);
                    outcome.did_trim = true;
                    outcome.words_removed += 1;
                    trace!(index = idx, remaining = words.len(), "removed word");
                    if words.is_empty() {
                        break;
                    }
                    children[idx].set_text_content(format!("{lead}{words}"));
                    overflowing = gauge.overflows(children);
                    if !overflowing {
                        break;
                    }
                }
                if words.is_empty() {
                    children.remove(idx);
                    outcome.nodes_removed += 1;
                    trace!(index = idx, "removed exhausted node");
                    overflowing = gauge.overflows(children);
                }
            }
        }
    }

    if outcome.did_trim {
        settle_ellipsis(children, &mut gauge, config, &mut outcome);
    }

    outcome.measurements += gauge.measurements;
    debug!(
        did_trim = outcome.did_trim,
        words_removed = outcome.words_removed,
        nodes_removed = outcome.nodes_removed,
        measurements = outcome.measurements,
        "fit complete"
    );
    outcome
}

/// Drop the last word of the anchor text and append the ellipsis, dropping
/// further words while the result still overflows.
///
/// A carrier emptied down to the bare marker that still overflows is removed
/// and the marker moves to the previous text node. Ends fitting or with no
/// text node left.
fn settle_ellipsis<M: Measure + ?Sized>(
    children: &mut Vec<Node>,
    gauge: &mut Gauge<'_, M>,
    config: &ElideConfig,
    outcome: &mut FitOutcome,
) {
    let Some(mut path) = anchor_path(children, config.anchor) else {
        debug!("no text node left to carry the ellipsis");
        return;
    };
    let mut first_carrier = true;

    loop {
        let Some(anchor) = text_at(children, &path) else {
            return;
        };
        let anchor = anchor.to_owned();
        let lead = leading_space(&anchor);
        let mut kept = if first_carrier {
            outcome.words_removed += 1;
            remove_last_word(&anchor)
        } else {
            anchor.trim()
        };
        first_carrier = false;
        outcome.ellipsis_appended = true;

        loop {
            if let Some(slot) = text_at_mut(children, &path) {
                *slot = format!("{lead}{kept}{}", config.ellipsis);
            }
            if !gauge.overflows(children) {
                return;
            }
            if kept.is_empty() {
                break;
            }
            kept = remove_last_word(kept);
            outcome.words_removed += 1;
            trace!(remaining = kept.len(), "removed word to fit ellipsis");
        }

        remove_at(children, &path);
        outcome.nodes_removed += 1;
        outcome.ellipsis_appended = false;
        match anchor_path(children, config.anchor) {
            Some(previous) => {
                trace!(path = ?previous, "moved ellipsis to previous text");
                path = previous;
            }
            None => {
                debug!("ellipsis carriers exhausted");
                return;
            }
        }
    }
}

/// Leading whitespace of `text`, kept so a trimmed node stays separated from
/// the node before it.
fn leading_space(text: &str) -> &str {
    &text[..text.len() - text.trim_start().len()]
}

fn contains_input(node: &Node) -> bool {
    match node {
        Node::Input(_) => true,
        Node::Element(element) => element.children.iter().any(contains_input),
        Node::Text(_) | Node::Break => false,
    }
}

/// Index path to the last text node, searching per `search`.
fn anchor_path(nodes: &[Node], search: AnchorSearch) -> Option<Vec<usize>> {
    for (idx, node) in nodes.iter().enumerate().rev() {
        match node {
            Node::Text(_) => return Some(vec![idx]),
            Node::Element(element) if search == AnchorSearch::Recursive && !contains_input(node) => {
                if let Some(mut path) = anchor_path(&element.children, search) {
                    path.insert(0, idx);
                    return Some(path);
                }
            }
            _ => {}
        }
    }
    None
}

fn text_at<'n>(nodes: &'n [Node], path: &[usize]) -> Option<&'n str> {
    let (&first, rest) = path.split_first()?;
    match nodes.get(first)? {
        Node::Text(text) if rest.is_empty() => Some(text),
        Node::Element(element) => text_at(&element.children, rest),
        _ => None,
    }
}

fn text_at_mut<'n>(nodes: &'n mut [Node], path: &[usize]) -> Option<&'n mut String> {
    let (&first, rest) = path.split_first()?;
    match nodes.get_mut(first)? {
        Node::Text(text) if rest.is_empty() => Some(text),
        Node::Element(element) => text_at_mut(&mut element.children, rest),
        _ => None,
    }
}

fn remove_at(nodes: &mut Vec<Node>, path: &[usize]) {
    match path {
        [] => {}
        [idx] => {
            if *idx < nodes.len() {
                nodes.remove(*idx);
            }
        }
        [first, rest @ ..] => {
            if let Some(Node::Element(element)) = nodes.get_mut(*first) {
                remove_at(&mut element.children, rest);
            }
        }
    }
}
