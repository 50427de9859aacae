#![forbid(unsafe_code)]

//! Core: cell geometry and resize notification scheduling.

pub mod debounce;
pub mod geometry;
