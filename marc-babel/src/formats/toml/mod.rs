//! TOML format implementation
//!
//! Delegates to the `toml` crate. TOML is the narrowest of the formats: the root has to be a
//! table and there is no null, so serializing such trees fails with a
//! [`FormatError::SerializationError`]. Datetimes are read through their serde representation.

use crate::error::FormatError;
use crate::format::Format;
use serde_json::Value;

pub struct TomlFormat;

impl Format for TomlFormat {
    fn name(&self) -> &str {
        "toml"
    }

    fn description(&self) -> &str {
        "TOML table format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, source: &str) -> Result<Value, FormatError> {
        toml::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        toml::to_string_pretty(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
