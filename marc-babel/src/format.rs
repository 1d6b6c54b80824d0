//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for reading source text into the tree value every
//! format shares, and for writing that tree back out.

use crate::error::FormatError;
use serde_json::Value;

/// Trait for document formats
///
/// Implementors provide bidirectional conversion between their string representation and the
/// tree value (a `serde_json::Value`). The tree is the common ground between all formats, so a
/// conversion from A to B is always `A::parse` followed by `B::serialize`.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn parse(&self, source: &str) -> Result<Value, FormatError> {
///         todo!()
///     }
///
///     fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "marc", "json", "yaml")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["marc"], ["yaml", "yml"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Parse source text into a tree
    fn parse(&self, source: &str) -> Result<Value, FormatError>;

    /// Serialize a tree into source text
    fn serialize(&self, tree: &Value) -> Result<String, FormatError>;
}
