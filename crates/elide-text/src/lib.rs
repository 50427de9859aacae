#![forbid(unsafe_code)]

//! Text primitives for elide.
//!
//! - [`remove_last_word`] - the word splitter used to shrink overflowing content
//! - [`segments`] - whitespace/word runs for inline layout
//! - [`WidthCache`] - LRU cache for cell-width measurements
//!
//! # Example
//! ```
//! use elide_text::{display_width, remove_last_word, WidthCache};
//!
//! assert_eq!(remove_last_word("a b c"), "a b");
//! assert_eq!(remove_last_word("solo"), "");
//!
//! let mut cache = WidthCache::new(64);
//! assert_eq!(cache.get_or_compute("你好"), 4);
//! assert_eq!(display_width("hello"), 5);
//! ```

pub mod width;
pub mod words;

pub use width::{CacheStats, DEFAULT_CACHE_CAPACITY, WidthCache, display_width, graphemes};
pub use words::{Segment, remove_last_word, segments};
