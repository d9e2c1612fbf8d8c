//! The renderer facade: layout plus composition behind one object.

use std::sync::Arc;

use textrect_render::{GlyphSource, Image, PackedRgba, Size, TextRect};

use crate::cache::CacheStats;
use crate::compose::Composer;
use crate::config::{LayoutOptions, RendererConfig};
use crate::error::LayoutError;
use crate::metrics::MetricsProvider;
use crate::wrap::{Layout, break_lines};

/// Counters for both engine caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererStats {
    pub metrics: CacheStats,
    pub composition: CacheStats,
}

/// Renders strings into a fixed bounding box in one font and color.
///
/// Intended to be called every frame with the current text. Unchanged text
/// is served from cache; text that grew by a wrapped line costs one blit.
///
/// The renderer is single-threaded (`&mut self`); share it across threads
/// behind a lock, or give each thread its own.
///
/// # Example
/// ```
/// use textrect::TextRectRenderer;
/// use textrect_render::{BlockFont, PackedRgba, Size};
///
/// let mut renderer =
///     TextRectRenderer::new(BlockFont::new(6, 11), Size::new(128, 64), PackedRgba::GREEN);
/// let image = renderer.render("1969: first crewed moon landing").unwrap();
/// assert_eq!(image.size(), Size::new(128, 64));
///
/// let cursor = renderer.last_rect("1969: first crewed moon landing").unwrap();
/// assert_eq!(cursor.y, 12);
/// ```
pub struct TextRectRenderer<F> {
    bounds: Size,
    layout: LayoutOptions,
    metrics: MetricsProvider<F>,
    composer: Composer<F>,
}

impl<F: GlyphSource> TextRectRenderer<F> {
    /// Create a renderer with the default configuration.
    #[must_use]
    pub fn new(font: F, bounds: Size, color: PackedRgba) -> Self {
        Self::with_config(Arc::new(font), bounds, color, &RendererConfig::default())
    }

    /// Create a renderer sharing `font` with other owners.
    #[must_use]
    pub fn with_config(
        font: Arc<F>,
        bounds: Size,
        color: PackedRgba,
        config: &RendererConfig,
    ) -> Self {
        tracing::debug!(
            width = bounds.width,
            height = bounds.height,
            metrics_capacity = config.metrics_capacity,
            composition_capacity = config.composition_capacity,
            "text renderer created"
        );
        Self {
            bounds,
            layout: config.layout,
            metrics: MetricsProvider::new(Arc::clone(&font), config.metrics_capacity),
            composer: Composer::new(font, bounds, color, config.composition_capacity),
        }
    }

    /// Wrap and stack `text` without drawing it.
    pub fn layout(&mut self, text: &str) -> Result<Layout, LayoutError> {
        break_lines(text, self.bounds, &mut self.metrics, &self.layout)
    }

    /// Render `text` into an image exactly the size of the bounding box.
    ///
    /// Identical inputs return the same shared image.
    pub fn render(&mut self, text: &str) -> Result<Arc<Image>, LayoutError> {
        let layout = self.layout(text)?;
        Ok(self.composer.compose(layout.placements()))
    }

    /// Rectangle of the last wrapped line, positioned where `render` would
    /// draw it. Runs layout only.
    pub fn last_rect(&mut self, text: &str) -> Result<TextRect, LayoutError> {
        self.layout(text).map(|layout| layout.last_rect())
    }

    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    #[must_use]
    pub fn color(&self) -> PackedRgba {
        self.composer.color()
    }

    #[must_use]
    pub fn font(&self) -> &Arc<F> {
        self.metrics.font()
    }

    #[must_use]
    pub fn stats(&self) -> RendererStats {
        RendererStats {
            metrics: self.metrics.stats(),
            composition: self.composer.stats(),
        }
    }

    /// Forget all cached measurements and images.
    pub fn clear_caches(&mut self) {
        self.metrics.clear();
        self.composer.clear();
    }
}

impl<F> std::fmt::Debug for TextRectRenderer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRectRenderer")
            .field("bounds", &self.bounds)
            .field("layout", &self.layout)
            .field("metrics", &self.metrics)
            .field("composer", &self.composer)
            .finish()
    }
}
