//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error while reading source text into a tree
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error while writing a tree into source text
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
