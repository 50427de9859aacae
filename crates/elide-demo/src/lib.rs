#![forbid(unsafe_code)]

//! Terminal demo for elide.
//!
//! A framed box of text that trims itself with an ellipsis whenever the
//! terminal or the box changes size. Hovering the box shows the full text.

pub mod app;
pub mod cli;
pub mod logging;
pub mod terminal;
