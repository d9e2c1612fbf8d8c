#![forbid(unsafe_code)]

//! Pixel surfaces and the glyph capability for textrect.
//!
//! # Role in textrect
//! `textrect-render` is the leaf crate. It owns the RGBA [`Image`] that the
//! engine composes into, the [`PackedRgba`] color type, pixel geometry, and the
//! [`GlyphSource`] trait through which the engine reaches a font backend.
//!
//! # Primary responsibilities
//! - **Image**: fixed-size RGBA8 surface with clipped source-over blits.
//! - **GlyphSource**: `measure` + `draw`, the only font operations the engine
//!   consumes.
//! - **BlockFont**: a deterministic monospace glyph source for hosts without a
//!   rasterizer and for tests.
//!
//! # How it fits in the system
//! The `textrect` crate measures fragments and draws lines through a
//! `GlyphSource`, then stacks the drawn lines into an `Image` sized to the
//! caller's bounding box. The finished image is handed to the host as an
//! opaque pixel buffer.

pub mod block_font;
pub mod color;
pub mod geometry;
pub mod glyph;
pub mod image;

pub use block_font::BlockFont;
pub use color::PackedRgba;
pub use geometry::{Size, TextRect};
pub use glyph::GlyphSource;
pub use image::Image;
