//! JSON format implementation
//!
//! JSON is the pivot of the workbench: every other format converts to and from it. Parsing and
//! serialization are delegated to `serde_json`; the only knob is the indentation of the pretty
//! printer. Object keys keep their source order (`preserve_order`).

use crate::error::FormatError;
use crate::format::Format;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Options for the JSON pretty printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonOptions {
    /// Number of spaces per indentation level
    pub indent: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

#[derive(Debug, Default)]
pub struct JsonFormat {
    options: JsonOptions,
}

impl JsonFormat {
    pub fn new(options: JsonOptions) -> Self {
        Self { options }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON, the pivot tree format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, source: &str) -> Result<Value, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        let indent = " ".repeat(self.options.indent);
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut out,
            PrettyFormatter::with_indent(indent.as_bytes()),
        );
        tree.serialize(&mut serializer)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        String::from_utf8(out).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
