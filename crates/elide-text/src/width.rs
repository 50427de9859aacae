#![forbid(unsafe_code)]

//! Cell-width measurement.
//!
//! Layout re-measures the same words after every single word removal, so
//! widths go through an LRU cache keyed by a 64-bit FxHash of the text.

use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Display width of `text` in terminal cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Iterate extended grapheme clusters with their cell widths.
///
/// Zero-width clusters (lone combining marks, control characters) are yielded
/// with width 0 so callers can decide whether to skip them.
pub fn graphemes(text: &str) -> impl Iterator<Item = (&str, usize)> {
    text.graphemes(true).map(|g| (g, g.width()))
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache for text width measurements.
///
/// Keys are 64-bit hashes rather than owned strings, trading a ~2^-64
/// collision chance for not allocating on every lookup.
///
/// Not thread-safe; each layout engine owns one.
#[derive(Debug)]
pub struct WidthCache {
    cache: LruCache<u64, usize>,
    hits: u64,
    misses: u64,
}

impl WidthCache {
    /// Create a cache with the given capacity (zero is treated as one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Get the cached width of `text`, computing it on a miss.
    pub fn get_or_compute(&mut self, text: &str) -> usize {
        let key = hash_text(text);
        if let Some(&width) = self.cache.get(&key) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = display_width(text);
        self.cache.put(key, width);
        width
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Drop all entries and reset statistics.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[inline]
fn hash_text(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}
