#![forbid(unsafe_code)]

//! Rendering surface for elide: a grid of terminal cells.

pub mod buffer;
pub mod cell;

pub use buffer::Buffer;
pub use cell::{Cell, CellAttrs, CellContent};
