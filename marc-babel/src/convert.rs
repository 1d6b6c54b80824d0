//! Conversion collaborator used by the synchronization hub
//!
//! The hub never talks to formats directly. It only needs three operations, all of them pure
//! functions of their input text:
//!
//! - `to_tree`: text of one kind into pivot (JSON) text
//! - `from_tree`: pivot text into text of one kind
//! - `canonicalize`: marc text into its canonical layout
//!
//! Keeping the contract this narrow lets the hub be tested against scripted converters, while
//! [`BabelConverter`] provides the real implementation on top of a [`FormatRegistry`].

use crate::error::FormatError;
use crate::formats::json::{JsonFormat, JsonOptions};
use crate::formats::marc::eval::MAX_DEPTH;
use crate::formats::marc::formatting_rules::FormattingRules;
use crate::formats::marc::MarcFormat;
use crate::formats::toml::TomlFormat;
use crate::formats::yaml::YamlFormat;
use crate::registry::FormatRegistry;
use crate::sync::FormatKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Which direction of a conversion failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The input text could not be read
    Parse,
    /// The tree could not be written in the target format
    Serialize,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Parse => f.write_str("parse"),
            ErrorKind::Serialize => f.write_str("serialize"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind} error: {message}")]
pub struct ConversionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ConversionError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            message: message.into(),
        }
    }

    pub fn serialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Serialize,
            message: message.into(),
        }
    }

    /// Classify a registry error. Errors that belong to neither direction (an unknown format)
    /// take the kind of the direction they happened in.
    fn from_format(err: FormatError, direction: ErrorKind) -> Self {
        match err {
            FormatError::ParseError(message) => Self::parse(message),
            FormatError::SerializationError(message) => Self::serialize(message),
            other => Self {
                kind: direction,
                message: other.to_string(),
            },
        }
    }
}

/// The conversion contract the hub is written against
pub trait Converter {
    fn to_tree(&self, kind: FormatKind, text: &str) -> Result<String, ConversionError>;

    fn from_tree(&self, kind: FormatKind, tree: &str) -> Result<String, ConversionError>;

    fn canonicalize(&self, text: &str) -> Result<String, ConversionError>;
}

/// [`Converter`] backed by the format registry
pub struct BabelConverter {
    registry: FormatRegistry,
    marc: MarcFormat,
}

impl BabelConverter {
    pub fn new(rules: FormattingRules, json: JsonOptions) -> Self {
        let mut registry = FormatRegistry::new();
        registry.register(MarcFormat::new(rules.clone()));
        registry.register(JsonFormat::new(json));
        registry.register(YamlFormat);
        registry.register(TomlFormat);
        Self {
            registry,
            marc: MarcFormat::new(rules),
        }
    }

    /// The registry conversions go through, configured with the same options.
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }
}

impl Default for BabelConverter {
    fn default() -> Self {
        Self::new(FormattingRules::default(), JsonOptions::default())
    }
}

/// Whether `value` holds more than `limit` levels of containers, itself included.
fn nests_deeper_than(value: &Value, limit: usize) -> bool {
    match value {
        Value::Array(items) => limit == 0 || items.iter().any(|v| nests_deeper_than(v, limit - 1)),
        Value::Object(fields) => {
            limit == 0 || fields.values().any(|v| nests_deeper_than(v, limit - 1))
        }
        _ => false,
    }
}

impl Converter for BabelConverter {
    fn to_tree(&self, kind: FormatKind, text: &str) -> Result<String, ConversionError> {
        let value = self
            .registry
            .parse(text, kind.name())
            .map_err(|e| ConversionError::from_format(e, ErrorKind::Parse))?;
        if nests_deeper_than(&value, MAX_DEPTH) {
            return Err(ConversionError::parse(format!(
                "the {} document nests deeper than {MAX_DEPTH} levels",
                kind.label()
            )));
        }
        self.registry
            .serialize(&value, FormatKind::Tree.name())
            .map_err(|e| ConversionError::from_format(e, ErrorKind::Serialize))
    }

    fn from_tree(&self, kind: FormatKind, tree: &str) -> Result<String, ConversionError> {
        let value = self
            .registry
            .parse(tree, FormatKind::Tree.name())
            .map_err(|e| ConversionError::from_format(e, ErrorKind::Parse))?;
        self.registry
            .serialize(&value, kind.name())
            .map_err(|e| ConversionError::from_format(e, ErrorKind::Serialize))
    }

    fn canonicalize(&self, text: &str) -> Result<String, ConversionError> {
        self.marc
            .canonicalize(text)
            .map_err(|e| ConversionError::from_format(e, ErrorKind::Parse))
    }
}
