#![forbid(unsafe_code)]

//! Word wrapping into a pixel bounding box.
//!
//! The breaker works in three passes:
//! 1. Split the input on explicit line breaks into *requested lines*.
//! 2. Keep requested lines that already fit; greedily word-wrap the rest.
//! 3. Stack the resulting lines top to bottom, one line height plus
//!    [`LayoutOptions::line_spacing`] apart.
//!
//! Any failure aborts the whole call. A word that cannot fit on a line of its
//! own yields [`LayoutError::WordTooWide`]; lines that stack past the bottom
//! of the box yield [`LayoutError::ContentTooTall`].
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use textrect::metrics::MetricsProvider;
//! use textrect::wrap::break_lines;
//! use textrect::LayoutOptions;
//! use textrect_render::{BlockFont, Size};
//!
//! let mut metrics = MetricsProvider::new(Arc::new(BlockFont::new(6, 12)), 64);
//! let layout = break_lines(
//!     "HELLO WORLD THIS IS A TEST",
//!     Size::new(80, 64),
//!     &mut metrics,
//!     &LayoutOptions::default(),
//! )
//! .unwrap();
//! let texts: Vec<&str> = layout.lines().map(|l| l.text()).collect();
//! assert_eq!(texts, vec!["HELLO WORLD", "THIS IS A", "TEST"]);
//! ```

use smallvec::SmallVec;
use textrect_render::{GlyphSource, Size, TextRect};

use crate::config::{BlankLine, LayoutOptions};
use crate::error::LayoutError;
use crate::metrics::MetricsProvider;

/// A line's text and vertical position: the unit of composition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedLine {
    pub text: String,
    /// Pixels from the top of the box.
    pub offset: u32,
}

impl PlacedLine {
    #[must_use]
    pub fn new(text: impl Into<String>, offset: u32) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}

/// One wrapped output line, borrowed from its [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    placed: &'a PlacedLine,
    rect: TextRect,
}

impl<'a> Line<'a> {
    #[must_use]
    pub fn text(self) -> &'a str {
        &self.placed.text
    }

    #[must_use]
    pub fn offset(self) -> u32 {
        self.placed.offset
    }

    /// Measured rectangle, positioned at `(0, offset)`.
    #[must_use]
    pub fn rect(self) -> TextRect {
        self.rect
    }

    #[must_use]
    pub fn placed(self) -> &'a PlacedLine {
        self.placed
    }

    /// `true` for placeholder lines produced by empty requested lines.
    #[must_use]
    pub fn is_blank(self) -> bool {
        self.placed.text.is_empty()
    }
}

/// Result of breaking a string into a box.
///
/// Placements and rectangles are stored side by side so the placements can be
/// handed to the composer as a slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    placed: Vec<PlacedLine>,
    rects: Vec<TextRect>,
    last_rect: TextRect,
}

impl Layout {
    /// Lines top to bottom.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = Line<'_>> + ExactSizeIterator {
        self.placed
            .iter()
            .zip(self.rects.iter().copied())
            .map(|(placed, rect)| Line { placed, rect })
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<Line<'_>> {
        Some(Line {
            placed: self.placed.get(index)?,
            rect: *self.rects.get(index)?,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Rectangle of the final line at its stacked position, or an empty
    /// rectangle at the origin when there are no lines.
    ///
    /// Hosts use this to place a text cursor after the last character.
    #[must_use]
    pub fn last_rect(&self) -> TextRect {
        self.last_rect
    }

    /// Composition key for the whole layout.
    #[must_use]
    pub fn placements(&self) -> &[PlacedLine] {
        &self.placed
    }

    /// Bottom edge of the last line (0 when empty).
    #[must_use]
    pub fn content_height(&self) -> u32 {
        self.lines()
            .next_back()
            .map_or(0, |line| line.offset().saturating_add(line.rect.height))
    }
}

/// A wrapped line before vertical placement.
#[derive(Debug)]
struct Fragment {
    text: String,
    rect: TextRect,
}

/// Break `text` into lines that fit `bounds`.
///
/// See the module docs for the algorithm. The result is a pure function of
/// `text`, `bounds`, the font behind `metrics` and `options`; the metrics cache
/// only affects how much measuring is repeated.
pub fn break_lines<F: GlyphSource>(
    text: &str,
    bounds: Size,
    metrics: &mut MetricsProvider<F>,
    options: &LayoutOptions,
) -> Result<Layout, LayoutError> {
    let mut fragments = Vec::new();

    for requested in text.lines() {
        if requested.is_empty() {
            fragments.push(blank_fragment(metrics, options));
            continue;
        }

        let rect = metrics.measure(requested);
        if rect.width <= bounds.width {
            fragments.push(Fragment {
                text: requested.to_owned(),
                rect,
            });
            continue;
        }

        wrap_requested_line(requested, bounds.width, metrics, options, &mut fragments)?;
    }

    stack(fragments, bounds.height, options.line_spacing)
}

fn blank_fragment<F: GlyphSource>(
    metrics: &mut MetricsProvider<F>,
    options: &LayoutOptions,
) -> Fragment {
    let rect = match options.blank_line {
        BlankLine::FontLineHeight => {
            let space = metrics.measure(" ");
            TextRect::new(0, space.height, space.baseline)
        }
        BlankLine::Fixed(height) => TextRect::new(0, height, height),
    };
    Fragment {
        text: String::new(),
        rect,
    }
}

fn close_line<F: GlyphSource>(
    text: &str,
    metrics: &mut MetricsProvider<F>,
    options: &LayoutOptions,
) -> Fragment {
    if text.is_empty() {
        return blank_fragment(metrics, options);
    }
    Fragment {
        text: text.to_owned(),
        rect: metrics.measure(text),
    }
}

/// Greedy word wrap of one requested line that is wider than the box.
fn wrap_requested_line<F: GlyphSource>(
    line: &str,
    max_width: u32,
    metrics: &mut MetricsProvider<F>,
    options: &LayoutOptions,
    out: &mut Vec<Fragment>,
) -> Result<(), LayoutError> {
    let words: SmallVec<[&str; 16]> = line.split(' ').collect();

    // Validate every word before emitting anything for this line.
    for word in &words {
        let width = metrics.width(word);
        if width >= max_width {
            tracing::debug!(word = *word, width, max_width, "word too wide for box");
            return Err(LayoutError::WordTooWide {
                word: (*word).to_owned(),
                width,
                max_width,
            });
        }
    }

    let emitted_before = out.len();
    let mut words = words.into_iter();
    let mut current = String::with_capacity(line.len());
    if let Some(first) = words.next() {
        current.push_str(first);
    }

    for word in words {
        let committed = current.len();
        current.push(' ');
        current.push_str(word);
        if metrics.width(&current) < max_width {
            continue;
        }

        current.truncate(committed);
        let closed = current.trim_end_matches(' ');
        if !closed.is_empty() {
            out.push(close_line(closed, metrics, options));
        }
        current.clear();
        current.push_str(word);
    }

    // A tail of nothing but spaces is not a line, unless the whole requested
    // line was spaces and would otherwise vanish.
    let tail = current.trim_end_matches(' ');
    if !tail.is_empty() || out.len() == emitted_before {
        out.push(close_line(tail, metrics, options));
    }
    Ok(())
}

/// Assign vertical offsets, failing if any line crosses the bottom edge.
fn stack(fragments: Vec<Fragment>, max_height: u32, spacing: u32) -> Result<Layout, LayoutError> {
    let mut offsets = Vec::with_capacity(fragments.len());
    let mut offset = 0u32;

    for fragment in &fragments {
        let bottom = offset.saturating_add(fragment.rect.height);
        if bottom >= max_height {
            let required = required_height(&fragments, spacing);
            tracing::debug!(
                lines = fragments.len(),
                required,
                max_height,
                "wrapped text too tall for box"
            );
            return Err(LayoutError::ContentTooTall {
                line_count: fragments.len(),
                required,
                max_height,
            });
        }
        offsets.push(offset);
        offset = bottom.saturating_add(spacing);
    }

    let mut placed = Vec::with_capacity(fragments.len());
    let mut rects = Vec::with_capacity(fragments.len());
    for (fragment, offset) in fragments.into_iter().zip(offsets) {
        let y = i32::try_from(offset).unwrap_or(i32::MAX);
        rects.push(fragment.rect.at(0, y));
        placed.push(PlacedLine {
            text: fragment.text,
            offset,
        });
    }

    let last_rect = rects.last().copied().unwrap_or_default();
    Ok(Layout {
        placed,
        rects,
        last_rect,
    })
}

/// Total stacked height of all fragments, with spacing between them.
fn required_height(fragments: &[Fragment], spacing: u32) -> u32 {
    let gaps = u32::try_from(fragments.len().saturating_sub(1)).unwrap_or(u32::MAX);
    fragments
        .iter()
        .fold(0u32, |acc, f| acc.saturating_add(f.rect.height))
        .saturating_add(gaps.saturating_mul(spacing))
}
