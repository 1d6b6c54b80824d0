//! YAML format implementation
//!
//! Delegates to `serde_yaml`. YAML is more permissive than the tree: mappings with non-string
//! keys, tags and non-finite floats have no JSON counterpart and are rejected while parsing.

use crate::error::FormatError;
use crate::format::Format;
use serde_json::Value;

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML block format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn parse(&self, source: &str) -> Result<Value, FormatError> {
        serde_yaml::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        serde_yaml::to_string(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
