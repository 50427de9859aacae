#![forbid(unsafe_code)]

//! Cell types.
//!
//! A [`Cell`] is one column of one row. A grapheme two cells wide occupies
//! its own cell plus a [`CellContent::Continuation`] cell to its right.

bitflags::bitflags! {
    /// Cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellAttrs: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM       = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
        /// Reverse video.
        const REVERSE   = 0b0000_1000;
    }
}

/// What a cell shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    /// Nothing drawn; renders as a space.
    #[default]
    Empty,
    /// A grapheme cluster starting in this cell.
    Grapheme(String),
    /// Right half of a wide grapheme in the cell to the left.
    Continuation,
}

/// One terminal cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub content: CellContent,
    pub attrs: CellAttrs,
}

impl Cell {
    /// A cell showing `grapheme`.
    pub fn from_grapheme(grapheme: impl Into<String>) -> Self {
        Self {
            content: CellContent::Grapheme(grapheme.into()),
            attrs: CellAttrs::empty(),
        }
    }

    /// A cell showing `ch`.
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        Self::from_grapheme(ch)
    }

    /// Set the style flags.
    #[must_use]
    pub fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Whether nothing is drawn here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Whether this is the right half of a wide grapheme.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// The grapheme drawn in this cell, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match &self.content {
            CellContent::Grapheme(g) => Some(g),
            CellContent::Empty | CellContent::Continuation => None,
        }
    }
}
