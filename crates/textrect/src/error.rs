//! Error types for layout and configuration.

use std::fmt;

/// Why a string could not be laid out in the bounding box.
///
/// Both variants are terminal for the call that produced them: no partial
/// layout or image is returned. The caller decides whether to widen the box,
/// shorten the text, or surface a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A single word is at least as wide as the box, so no wrap can fit it.
    WordTooWide {
        word: String,
        width: u32,
        max_width: u32,
    },
    /// The wrapped lines stack taller than the box.
    ContentTooTall {
        line_count: usize,
        required: u32,
        max_height: u32,
    },
}

impl LayoutError {
    /// The offending word, for [`LayoutError::WordTooWide`].
    #[must_use]
    pub fn word(&self) -> Option<&str> {
        match self {
            Self::WordTooWide { word, .. } => Some(word),
            Self::ContentTooTall { .. } => None,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WordTooWide {
                word,
                width,
                max_width,
            } => write!(
                f,
                "the word {word:?} is too wide to fit ({width}px, box is {max_width}px)"
            ),
            Self::ContentTooTall {
                line_count,
                required,
                max_height,
            } => write!(
                f,
                "once word-wrapped, {line_count} lines need {required}px but the box is {max_height}px tall"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Invalid renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment override could not be parsed.
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value {value:?} for {key}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
