#![forbid(unsafe_code)]

//! Inline flow layout in terminal cells.
//!
//! Lays a node list out the way a browser lays out inline content with
//! `white-space: normal`, on a grid of character cells:
//!
//! - Whitespace runs collapse to a single space; a space at the start of a
//!   line is dropped and a space at the end of a line takes no room.
//! - A word that does not fit on the current line moves to the next one.
//!   Words from adjacent nodes with no whitespace between them are glued
//!   and never split across lines.
//!   A word wider than the box at the start of a line is placed anyway and
//!   overflows horizontally.
//! - [`Node::Break`] ends the current line; an empty line still takes a row.
//! - Inputs are atomic inline blocks: `[` + `cols` cells + `]`, `rows` tall
//!   for text areas. A select is as wide as its longest option plus its
//!   bracket and arrow decoration.
//! - A line is as tall as its tallest item.
//!
//! The same pass produces both the measurement and the positioned fragments
//! used for rendering, so what gets drawn is exactly what was measured.

use elide_core::geometry::Size;
use elide_text::{WidthCache, segments};

use crate::node::{Input, InputKind, Node};
use crate::probe::{BoxMetrics, Measure};

/// Cells taken by input decoration (`[` and `]`).
const INPUT_CHROME: usize = 2;
/// Cells taken by select decoration (`[`, ` `, arrow, `]`).
const SELECT_CHROME: usize = 4;

/// A positioned piece of laid-out content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Column of the fragment's left edge, relative to the box.
    pub x: usize,
    /// Row of the fragment's top edge, relative to the box.
    pub y: usize,
    /// Width in cells.
    pub width: usize,
    /// Height in rows.
    pub height: usize,
    pub kind: FragmentKind,
}

/// What a [`Fragment`] shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    /// A single word.
    Word(String),
    /// An input control box.
    Input {
        kind: InputKind,
        /// Value or placeholder.
        label: String,
        /// Whether `label` is the placeholder.
        is_placeholder: bool,
    },
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flow {
    pub fragments: Vec<Fragment>,
    pub metrics: BoxMetrics,
    /// Rows used by content (may exceed the box).
    pub content_height: usize,
    /// Columns used by content (may exceed the box).
    pub content_width: usize,
}

/// Terminal inline flow layout engine.
///
/// # Example
/// ```
/// use elide_core::geometry::Size;
/// use elide_layout::{FlowLayout, Measure, Node};
///
/// let mut layout = FlowLayout::new(Size::new(11, 3));
/// let flow = layout.layout(&[Node::text("Hello big world")]);
/// assert_eq!(flow.content_height, 2);
///
/// let metrics = layout.measure(&[Node::text("Hello big world")]);
/// assert_eq!(metrics.scroll, Size::new(11, 3));
/// ```
#[derive(Debug, Default)]
pub struct FlowLayout {
    viewport: Size,
    widths: WidthCache,
}

impl FlowLayout {
    /// Create a layout engine for a box of the given size.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            widths: WidthCache::default(),
        }
    }

    /// Lay out `content`, returning fragments and metrics.
    pub fn layout(&mut self, content: &[Node]) -> Flow {
        let mut fragments = Vec::new();
        let (content_width, content_height) = self.run(content, Some(&mut fragments));
        Flow {
            fragments,
            metrics: self.metrics(content_width, content_height),
            content_height,
            content_width,
        }
    }

    /// Width cache statistics, for diagnostics.
    #[must_use]
    pub fn cache_stats(&self) -> elide_text::CacheStats {
        self.widths.stats()
    }

    fn metrics(&self, content_width: usize, content_height: usize) -> BoxMetrics {
        let client = self.viewport;
        BoxMetrics {
            client,
            scroll: Size::saturating_from(content_width, content_height).max(client),
        }
    }

    fn run(&mut self, content: &[Node], fragments: Option<&mut Vec<Fragment>>) -> (usize, usize) {
        let mut items = Vec::new();
        flatten(content, &mut items);

        let mut cursor = Cursor {
            limit: usize::from(self.viewport.width),
            x: 0,
            y: 0,
            line_height: 0,
            pending_space: false,
            max_x: 0,
            fragments,
            widths: &mut self.widths,
        };

        let mut idx = 0;
        while idx < items.len() {
            match items[idx] {
                Item::Space => cursor.space(),
                Item::Break => cursor.end_line(),
                Item::Control(input) => cursor.input(input),
                Item::Word(_) => {
                    // Consecutive words have no break opportunity between them.
                    let end = items[idx..]
                        .iter()
                        .position(|item| !matches!(item, Item::Word(_)))
                        .map_or(items.len(), |n| idx + n);
                    cursor.words(&items[idx..end]);
                    idx = end;
                    continue;
                }
            }
            idx += 1;
        }
        (cursor.max_x, cursor.y + cursor.line_height)
    }
}

impl Measure for FlowLayout {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    fn measure(&mut self, content: &[Node]) -> BoxMetrics {
        let (width, height) = self.run(content, None);
        self.metrics(width, height)
    }
}

/// Flattened inline content.
#[derive(Debug, Clone, Copy)]
enum Item<'n> {
    Word(&'n str),
    Space,
    Break,
    Control(&'n Input),
}

fn flatten<'n>(nodes: &'n [Node], items: &mut Vec<Item<'n>>) {
    for node in nodes {
        match node {
            Node::Text(text) => items.extend(segments(text).map(|segment| {
                if segment.is_space {
                    Item::Space
                } else {
                    Item::Word(segment.text)
                }
            })),
            Node::Element(element) => flatten(&element.children, items),
            Node::Break => items.push(Item::Break),
            Node::Input(input) => items.push(Item::Control(input)),
        }
    }
}

/// Pen state for one layout pass.
struct Cursor<'a> {
    limit: usize,
    x: usize,
    y: usize,
    /// Height of the current line; zero while the line is empty.
    line_height: usize,
    pending_space: bool,
    max_x: usize,
    fragments: Option<&'a mut Vec<Fragment>>,
    widths: &'a mut WidthCache,
}

impl Cursor<'_> {
    fn space(&mut self) {
        self.pending_space = self.line_height > 0;
    }

    /// Place a run of glued words as one unit.
    fn words(&mut self, run: &[Item<'_>]) {
        let mut sized = Vec::with_capacity(run.len());
        for item in run {
            if let Item::Word(word) = *item {
                sized.push((word, self.widths.get_or_compute(word)));
            }
        }
        let total = sized.iter().map(|&(_, width)| width).sum();

        let (mut x, y) = self.place(total, 1);
        if let Some(fragments) = self.fragments.as_deref_mut() {
            for (word, width) in sized {
                fragments.push(Fragment {
                    x,
                    y,
                    width,
                    height: 1,
                    kind: FragmentKind::Word(word.to_owned()),
                });
                x += width;
            }
        }
    }

    fn input(&mut self, input: &Input) {
        let (width, height) = match input.kind {
            InputKind::Text => (usize::from(input.cols) + INPUT_CHROME, 1),
            InputKind::TextArea => (
                usize::from(input.cols) + INPUT_CHROME,
                usize::from(input.rows.max(1)),
            ),
            InputKind::Select => {
                let longest = input
                    .options
                    .iter()
                    .map(|option| self.widths.get_or_compute(option))
                    .max()
                    .unwrap_or(0);
                (longest + SELECT_CHROME, 1)
            }
        };
        let (x, y) = self.place(width, height);
        if let Some(fragments) = self.fragments.as_deref_mut() {
            fragments.push(Fragment {
                x,
                y,
                width,
                height,
                kind: FragmentKind::Input {
                    kind: input.kind,
                    label: input.label().to_owned(),
                    is_placeholder: input.value.is_empty(),
                },
            });
        }
    }

    /// Reserve `width` x `height` cells on the current line, wrapping first
    /// when the item does not fit. Returns the item's position.
    fn place(&mut self, width: usize, height: usize) -> (usize, usize) {
        let gap = usize::from(self.pending_space && self.line_height > 0);
        if self.line_height > 0 && self.x + gap + width > self.limit {
            self.end_line();
        } else {
            self.x += gap;
        }
        self.pending_space = false;

        let position = (self.x, self.y);
        self.x += width;
        self.line_height = self.line_height.max(height.max(1));
        self.max_x = self.max_x.max(self.x);
        position
    }

    fn end_line(&mut self) {
        self.y += self.line_height.max(1);
        self.x = 0;
        self.line_height = 0;
        self.pending_space = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Input;

    fn words(flow: &Flow) -> Vec<(usize, usize, &str)> {
        flow.fragments
            .iter()
            .filter_map(|f| match &f.kind {
                FragmentKind::Word(w) => Some((f.x, f.y, w.as_str())),
                FragmentKind::Input { .. } => None,
            })
            .collect()
    }

    #[test]
    fn fits_on_one_line() {
        let mut layout = FlowLayout::new(Size::new(11, 1));
        let flow = layout.layout(&[Node::text("Hello world")]);
        assert_eq!(words(&flow), vec![(0, 0, "Hello"), (6, 0, "world")]);
        assert_eq!(flow.metrics.scroll, Size::new(11, 1));
    }

    #[test]
    fn wraps_at_word_boundary() {
        let mut layout = FlowLayout::new(Size::new(5, 1));
        let flow = layout.layout(&[Node::text("Hello world")]);
        assert_eq!(words(&flow), vec![(0, 0, "Hello"), (0, 1, "world")]);
        assert_eq!(flow.metrics.scroll, Size::new(5, 2));
    }

    #[test]
    fn whitespace_collapses() {
        let mut layout = FlowLayout::new(Size::new(20, 1));
        let flow = layout.layout(&[Node::text("  a \n\t b  ")]);
        assert_eq!(words(&flow), vec![(0, 0, "a"), (2, 0, "b")]);
        assert_eq!(flow.content_width, 3);
    }

    #[test]
    fn space_carries_across_nodes() {
        let mut layout = FlowLayout::new(Size::new(20, 1));
        let content = vec![
            Node::text("Hello "),
            Node::element("b", [Node::text("big")]),
            Node::text("gest"),
        ];
        let flow = layout.layout(&content);
        assert_eq!(words(&flow), vec![(0, 0, "Hello"), (6, 0, "big"), (9, 0, "gest")]);
    }

    #[test]
    fn adjacent_words_across_nodes_are_glued() {
        let mut layout = FlowLayout::new(Size::new(7, 2));
        let content = vec![Node::text("ab cde"), Node::element("b", [Node::text("fg")])];
        let flow = layout.layout(&content);
        assert_eq!(words(&flow), vec![(0, 0, "ab"), (0, 1, "cde"), (3, 1, "fg")]);
    }

    #[test]
    fn long_word_overflows_horizontally() {
        let mut layout = FlowLayout::new(Size::new(4, 2));
        let metrics = layout.measure(&[Node::text("abcdefg")]);
        assert_eq!(metrics.scroll, Size::new(7, 2));
    }

    #[test]
    fn breaks_end_lines() {
        let mut layout = FlowLayout::new(Size::new(10, 1));
        assert_eq!(layout.layout(&[Node::text("a"), Node::Break]).content_height, 1);
        assert_eq!(
            layout
                .layout(&[Node::text("a"), Node::Break, Node::Break])
                .content_height,
            2
        );
        assert_eq!(
            layout
                .layout(&[Node::text("a"), Node::Break, Node::text("b")])
                .content_height,
            2
        );
        assert_eq!(layout.layout(&[Node::Break]).content_height, 1);
    }

    #[test]
    fn empty_content_measures_as_the_box() {
        let mut layout = FlowLayout::new(Size::new(6, 2));
        let flow = layout.layout(&[]);
        assert_eq!(flow.content_height, 0);
        assert_eq!(flow.metrics.scroll, Size::new(6, 2));
    }

    #[test]
    fn input_is_an_atomic_block() {
        let mut layout = FlowLayout::new(Size::new(30, 1));
        let content = vec![
            Node::text("Name: "),
            Node::from(Input::text_field().cols(10).placeholder("your name")),
        ];
        let flow = layout.layout(&content);
        let input = &flow.fragments[1];
        assert_eq!((input.x, input.y, input.width), (6, 0, 12));
        assert_eq!(
            input.kind,
            FragmentKind::Input {
                kind: InputKind::Text,
                label: "your name".into(),
                is_placeholder: true,
            }
        );
    }

    #[test]
    fn textarea_makes_line_taller() {
        let mut layout = FlowLayout::new(Size::new(40, 1));
        let content = vec![
            Node::text("Notes"),
            Node::from(Input::text_area().rows(3).cols(8)),
            Node::Break,
            Node::text("after"),
        ];
        assert_eq!(layout.layout(&content).content_height, 4);
    }

    #[test]
    fn select_width_from_longest_option() {
        let mut layout = FlowLayout::new(Size::new(40, 1));
        let flow = layout.layout(&[Node::from(Input::select(["no", "maybe"]))]);
        assert_eq!(flow.fragments[0].width, 9);
    }

    #[test]
    fn wide_glyphs_count_two_cells() {
        let mut layout = FlowLayout::new(Size::new(5, 1));
        let metrics = layout.measure(&[Node::text("你好 世界")]);
        assert_eq!(metrics.scroll, Size::new(5, 2));
    }

    #[test]
    fn measure_matches_layout_metrics() {
        let mut layout = FlowLayout::new(Size::new(7, 2));
        let content = vec![Node::text("one two three four five")];
        let measured = layout.measure(&content);
        assert_eq!(layout.layout(&content).metrics, measured);
    }

    #[test]
    fn repeated_measures_hit_width_cache() {
        let mut layout = FlowLayout::new(Size::new(7, 2));
        let content = vec![Node::text("one two one two")];
        layout.measure(&content);
        let stats = layout.cache_stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn set_viewport_reflows() {
        let mut layout = FlowLayout::new(Size::new(3, 1));
        let content = vec![Node::text("aa bb")];
        assert_eq!(layout.measure(&content).scroll.height, 2);
        layout.set_viewport(Size::new(5, 1));
        assert_eq!(layout.measure(&content).scroll.height, 1);
    }
}
