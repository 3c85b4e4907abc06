//! Error types for the extraction core.

use thiserror::Error;

/// Errors raised while building the pattern catalog. All of them are fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A built-in or custom pattern failed to compile.
    #[error("invalid pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A custom pattern compiled but has no capture group for the key.
    #[error("pattern '{name}' must capture the key in group 1")]
    MissingKeyGroup { name: String },

    /// Interpolation delimiters must not be empty.
    #[error("{which} delimiter must not be empty")]
    EmptyDelimiter { which: &'static str },
}

/// Rejection from the plural literal parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluralLiteralError {
    #[error("expected '{expected}' at offset {offset}")]
    Expected { expected: char, offset: usize },

    #[error("expected a quoted string at offset {offset}")]
    NotAString { offset: usize },

    #[error("unterminated string starting at offset {offset}")]
    Unterminated { offset: usize },

    #[error("invalid unicode escape at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("too many elements: {count} (max 3)")]
    TooManyElements { count: usize },

    #[error("unexpected trailing content at offset {offset}")]
    TrailingContent { offset: usize },
}
