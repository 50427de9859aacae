#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s representing the rendering surface
//! a widget draws into.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. A wide grapheme is never split: its continuation cell is written with
//!    it, or the grapheme is not written at all

use elide_core::geometry::Rect;
use elide_text::graphemes;

use crate::cell::{Cell, CellAttrs, CellContent};

/// A 2D grid of terminal cells.
///
/// # Example
///
/// ```
/// use elide_render::buffer::Buffer;
/// use elide_render::cell::{Cell, CellAttrs};
///
/// let mut buffer = Buffer::new(8, 2);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set_string(1, 0, "i!", CellAttrs::empty(), 8);
/// assert_eq!(buffer.to_lines(), vec!["Hi!", ""]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer of empty cells. Zero-sized buffers are allowed.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a cell, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable cell, or `None` when out of bounds.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Set a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Fill `area` (clipped to the buffer) with `cell`.
    pub fn fill(&mut self, area: Rect, cell: &Cell) {
        let area = area.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell.clone());
            }
        }
    }

    /// Draw `text` starting at `(x, y)`, stopping before `max_x` (exclusive).
    ///
    /// Zero-width clusters are skipped. Returns the column after the last
    /// drawn grapheme.
    pub fn set_string(&mut self, mut x: u16, y: u16, text: &str, attrs: CellAttrs, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for (grapheme, width) in graphemes(text) {
            if width == 0 {
                continue;
            }
            let Ok(width) = u16::try_from(width) else {
                break;
            };
            if x.saturating_add(width) > max_x {
                break;
            }
            self.set(x, y, Cell::from_grapheme(grapheme).with_attrs(attrs));
            for offset in 1..width {
                self.set(
                    x + offset,
                    y,
                    Cell {
                        content: CellContent::Continuation,
                        attrs,
                    },
                );
            }
            x += width;
        }
        x
    }

    /// Text of row `y` with empty cells as spaces and trailing spaces trimmed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        if y >= self.height {
            return out;
        }
        for x in 0..self.width {
            match self.get(x, y).map(|c| &c.content) {
                Some(CellContent::Grapheme(g)) => out.push_str(g),
                Some(CellContent::Continuation) => {}
                Some(CellContent::Empty) | None => out.push(' '),
            }
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// All rows as text, see [`Buffer::row_text`].
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_buffer_is_inert() {
        let mut buf = Buffer::new(0, 0);
        buf.set(0, 0, Cell::from_char('x'));
        assert!(buf.get(0, 0).is_none());
        assert!(buf.to_lines().is_empty());
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut buf = Buffer::new(2, 1);
        buf.set(5, 0, Cell::from_char('x'));
        assert_eq!(buf.to_lines(), vec![""]);
    }

    #[test]
    fn set_string_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_string(0, 0, "hello", CellAttrs::empty(), 3);
        assert_eq!(end, 3);
        assert_eq!(buf.row_text(0), "hel");
    }

    #[test]
    fn wide_grapheme_writes_continuation() {
        let mut buf = Buffer::new(4, 1);
        let end = buf.set_string(0, 0, "你好", CellAttrs::empty(), 4);
        assert_eq!(end, 4);
        assert!(buf.get(1, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.row_text(0), "你好");
    }

    #[test]
    fn wide_grapheme_never_split_at_edge() {
        let mut buf = Buffer::new(3, 1);
        buf.set_string(0, 0, "你好", CellAttrs::empty(), 3);
        assert_eq!(buf.row_text(0), "你");
        assert!(buf.get(2, 0).is_some_and(Cell::is_empty));
    }

    #[test]
    fn fill_is_clipped() {
        let mut buf = Buffer::new(3, 2);
        buf.fill(Rect::new(1, 1, 10, 10), &Cell::from_char('#'));
        assert_eq!(buf.to_lines(), vec!["", " ##"]);
    }

    #[test]
    fn clear_resets_cells() {
        let mut buf = Buffer::new(3, 1);
        buf.set_string(0, 0, "abc", CellAttrs::BOLD, 3);
        buf.clear();
        assert_eq!(buf, Buffer::new(3, 1));
    }

    #[test]
    fn row_text_keeps_interior_spaces() {
        let mut buf = Buffer::new(6, 1);
        buf.set(0, 0, Cell::from_char('a'));
        buf.set(3, 0, Cell::from_char('b'));
        assert_eq!(buf.row_text(0), "a  b");
    }
}
