//! Error type for the footnotes crate
//!
//! Expected conditions (no markers in a block, a missing content anchor, an
//! empty citation) are normal branches with fallback behavior and never
//! surface here. The error enum covers the genuine failure surface only:
//! reading markup in, writing markup out, and loading configuration.

use std::fmt;

/// Error that can occur while processing a document
#[derive(Debug, Clone, PartialEq)]
pub enum FootnoteError {
    /// Error while parsing HTML input
    ParseError(String),
    /// Error during HTML serialization
    SerializationError(String),
    /// Error while loading or deserializing configuration
    ConfigError(String),
    /// A selector string did not match the recognized grammar
    InvalidSelector(String),
}

impl fmt::Display for FootnoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootnoteError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FootnoteError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FootnoteError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            FootnoteError::InvalidSelector(sel) => write!(f, "Invalid selector '{sel}'"),
        }
    }
}

impl std::error::Error for FootnoteError {}
