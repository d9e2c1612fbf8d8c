//! Memoized fragment measurement.

use std::sync::Arc;

use textrect_render::{GlyphSource, TextRect};

use crate::cache::{BoundedCache, CacheStats};

/// Measures text fragments through a shared font, remembering recent results.
///
/// Measurements are pure functions of the fragment, so the cache is keyed by
/// the fragment text alone.
pub struct MetricsProvider<F> {
    font: Arc<F>,
    cache: BoundedCache<String, TextRect>,
}

impl<F: GlyphSource> MetricsProvider<F> {
    #[must_use]
    pub fn new(font: Arc<F>, capacity: usize) -> Self {
        Self {
            font,
            cache: BoundedCache::new(capacity),
        }
    }

    /// Rectangle of `text` at the origin.
    pub fn measure(&mut self, text: &str) -> TextRect {
        if let Some(rect) = self.cache.get(text).copied() {
            return rect;
        }
        let rect = self.font.measure(text);
        tracing::trace!(len = text.len(), width = rect.width, "measured fragment");
        self.cache.insert(text.to_owned(), rect);
        rect
    }

    /// Width of `text`, in pixels.
    pub fn width(&mut self, text: &str) -> u32 {
        self.measure(text).width
    }

    #[must_use]
    pub fn font(&self) -> &Arc<F> {
        &self.font
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<F> std::fmt::Debug for MetricsProvider<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsProvider")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
