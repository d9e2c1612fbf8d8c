#![forbid(unsafe_code)]

//! Text rectangles: word-wrapped strings rendered into fixed pixel boxes.
//!
//! # Role in textrect
//! `textrect` is the engine. Given a string, a bounding box, a font and a
//! color, it produces a box-sized transparent image with the text wrapped
//! and stacked from the top-left corner, plus the rectangle of the last
//! line so a host can place a cursor after it.
//!
//! # Primary responsibilities
//! - **Line breaking** ([`wrap`]): explicit breaks, greedy word wrap, vertical
//!   stacking, with typed failures for words and content that cannot fit.
//! - **Fragment metrics** ([`metrics`]): memoized font measurements.
//! - **Composition** ([`compose`]): box-sized images built from cached line
//!   prefixes, so per-frame redraws of slowly changing text stay cheap.
//! - **Facade** ([`TextRectRenderer`]): `render` and `last_rect` over one
//!   bounding box, font and color.
//!
//! # How it fits in the system
//! Fonts come in through [`textrect_render::GlyphSource`]; the finished
//! [`textrect_render::Image`] goes back to the host as an opaque pixel buffer.
//! Nothing here draws to a screen.

pub mod cache;
pub mod compose;
pub mod config;
pub mod error;
pub mod metrics;
mod renderer;
pub mod wrap;

pub use cache::CacheStats;
pub use config::{BlankLine, LayoutOptions, RendererConfig};
pub use error::{ConfigError, LayoutError};
pub use renderer::{RendererStats, TextRectRenderer};
pub use wrap::{Layout, Line, PlacedLine};

pub use textrect_render::{BlockFont, GlyphSource, Image, PackedRgba, Size, TextRect};

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use textrect_render::{BlockFont, GlyphSource, Image, PackedRgba, TextRect};

    /// Block font that counts how often the engine reaches it.
    #[derive(Debug)]
    pub struct CountingFont {
        inner: BlockFont,
        measures: Cell<usize>,
        draws: Cell<usize>,
    }

    impl CountingFont {
        pub fn new(cell_width: u32, cell_height: u32) -> Self {
            Self {
                inner: BlockFont::new(cell_width, cell_height),
                measures: Cell::new(0),
                draws: Cell::new(0),
            }
        }

        pub fn measure_calls(&self) -> usize {
            self.measures.get()
        }

        pub fn draw_calls(&self) -> usize {
            self.draws.get()
        }
    }

    impl GlyphSource for CountingFont {
        fn measure(&self, text: &str) -> TextRect {
            self.measures.set(self.measures.get() + 1);
            self.inner.measure(text)
        }

        fn draw(&self, text: &str, color: PackedRgba) -> Image {
            self.draws.set(self.draws.get() + 1);
            self.inner.draw(text, color)
        }
    }
}
