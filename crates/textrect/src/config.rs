//! Renderer configuration.
//!
//! Defaults match the classic behavior: 64-entry metric and composition
//! caches, one pixel between lines, and blank lines as tall as the font's
//! line height. Every field can be overridden from the environment:
//!
//! | Variable                         | Field                          |
//! |----------------------------------|--------------------------------|
//! | `TEXTRECT_METRICS_CAPACITY`      | `metrics_capacity`             |
//! | `TEXTRECT_COMPOSITION_CAPACITY`  | `composition_capacity`         |
//! | `TEXTRECT_LINE_SPACING`          | `layout.line_spacing`          |
//! | `TEXTRECT_BLANK_LINE_HEIGHT`     | `layout.blank_line` (`font` or pixels) |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_LINE_SPACING: u32 = 1;

const ENV_METRICS_CAPACITY: &str = "TEXTRECT_METRICS_CAPACITY";
const ENV_COMPOSITION_CAPACITY: &str = "TEXTRECT_COMPOSITION_CAPACITY";
const ENV_LINE_SPACING: &str = "TEXTRECT_LINE_SPACING";
const ENV_BLANK_LINE_HEIGHT: &str = "TEXTRECT_BLANK_LINE_HEIGHT";

/// Height given to an empty line (two consecutive line breaks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankLine {
    /// As tall as the font's measurement of a single space.
    #[default]
    FontLineHeight,
    /// A fixed height in pixels.
    Fixed(u32),
}

/// Options for the line breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Vertical pixels inserted after every line.
    pub line_spacing: u32,
    /// Height policy for empty lines.
    pub blank_line: BlankLine,
}

impl LayoutOptions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_spacing: DEFAULT_LINE_SPACING,
            blank_line: BlankLine::FontLineHeight,
        }
    }

    /// Set the spacing between lines.
    #[must_use]
    pub fn line_spacing(mut self, spacing: u32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the blank-line height policy.
    #[must_use]
    pub fn blank_line(mut self, policy: BlankLine) -> Self {
        self.blank_line = policy;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete configuration for a [`crate::TextRectRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Entries kept in the fragment metrics cache.
    pub metrics_capacity: usize,
    /// Entries kept in the composed-prefix cache.
    pub composition_capacity: usize,
    #[serde(flatten)]
    pub layout: LayoutOptions,
}

impl RendererConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            metrics_capacity: DEFAULT_CACHE_CAPACITY,
            composition_capacity: DEFAULT_CACHE_CAPACITY,
            layout: LayoutOptions::new(),
        }
    }

    #[must_use]
    pub fn metrics_capacity(mut self, capacity: usize) -> Self {
        self.metrics_capacity = capacity;
        self
    }

    #[must_use]
    pub fn composition_capacity(mut self, capacity: usize) -> Self {
        self.composition_capacity = capacity;
        self
    }

    #[must_use]
    pub fn line_spacing(mut self, spacing: u32) -> Self {
        self.layout.line_spacing = spacing;
        self
    }

    #[must_use]
    pub fn blank_line(mut self, policy: BlankLine) -> Self {
        self.layout.blank_line = policy;
        self
    }

    /// Defaults overlaid with `TEXTRECT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new().overlay_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values supplied by `get_env` on top of `self`.
    ///
    /// Unset variables leave the field untouched; set but unparseable values
    /// are an error rather than being silently ignored.
    pub fn overlay_env_with<G>(mut self, get_env: G) -> Result<Self, ConfigError>
    where
        G: Fn(&str) -> Option<String>,
    {
        if let Some(value) = get_env(ENV_METRICS_CAPACITY) {
            self.metrics_capacity = parse_number(ENV_METRICS_CAPACITY, &value)?;
        }
        if let Some(value) = get_env(ENV_COMPOSITION_CAPACITY) {
            self.composition_capacity = parse_number(ENV_COMPOSITION_CAPACITY, &value)?;
        }
        if let Some(value) = get_env(ENV_LINE_SPACING) {
            self.layout.line_spacing = parse_number(ENV_LINE_SPACING, &value)?;
        }
        if let Some(value) = get_env(ENV_BLANK_LINE_HEIGHT) {
            self.layout.blank_line = parse_blank_line(&value)?;
        }
        Ok(self)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
        })
}

fn parse_blank_line(value: &str) -> Result<BlankLine, ConfigError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("font") {
        return Ok(BlankLine::FontLineHeight);
    }
    parse_number(ENV_BLANK_LINE_HEIGHT, trimmed).map(BlankLine::Fixed)
}
