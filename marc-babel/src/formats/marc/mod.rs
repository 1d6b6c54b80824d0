//! MARC format implementation
//!
//! MARC is a line-oriented assignment syntax: every entry spells out the full path to one scalar
//! value, and evaluating the entries in order builds the tree.
//!
//! ```text
//! # comments start with a hash
//! .player.name = 'Gandalf'
//! .player.stats{"max hp"} = 120
//! .player.items[i].name = 'staff'
//! .player.items[ ].weight = 2.5
//! ```
//!
//! # Pipeline
//!
//! - `lexer`: `logos` tokens with byte spans
//! - `parser`: statements (blank lines, comments, entries) so a document can be reprinted
//! - `eval`: entries into a `serde_json::Value`, inferring container types from accesses
//! - `diagnostics`: typed errors and their `ariadne` rendering
//! - `serializer` / `printer`: tree to text, and the canonical layout shared with the formatter
//!
//! Parsing a document keeps comments and blank lines around so that [`MarcFormat::canonicalize`]
//! can reprint it without losing them. Serializing from a tree has no comments to keep.

pub mod ast;
pub mod diagnostics;
pub mod eval;
pub mod formatting_rules;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use diagnostics::MarcError;
use formatting_rules::FormattingRules;
use serde_json::Value;
use serializer::MarcSerializer;

/// Evaluate marc source into a tree, keeping the typed error.
pub fn evaluate(source: &str) -> Result<Value, MarcError> {
    let statements = parser::parse(source)?;
    Ok(eval::evaluate(&statements)?)
}

#[derive(Debug, Default)]
pub struct MarcFormat {
    rules: FormattingRules,
}

impl MarcFormat {
    pub fn new(rules: FormattingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &FormattingRules {
        &self.rules
    }

    /// Reprint a document in canonical layout.
    ///
    /// The document has to evaluate cleanly first; a document with a duplicate assignment is not
    /// something the formatter should make look tidy.
    pub fn canonicalize(&self, source: &str) -> Result<String, FormatError> {
        let statements =
            parser::parse(source).map_err(|e| parse_error(MarcError::from(e), source))?;
        eval::evaluate(&statements).map_err(|e| parse_error(MarcError::from(e), source))?;
        Ok(printer::print_statements(&statements, &self.rules))
    }
}

fn parse_error(err: MarcError, source: &str) -> FormatError {
    tracing::debug!(error = %err, "marc source rejected");
    FormatError::ParseError(err.render(source))
}

impl Format for MarcFormat {
    fn name(&self) -> &str {
        "marc"
    }

    fn description(&self) -> &str {
        "MARC assignment syntax"
    }

    fn file_extensions(&self) -> &[&str] {
        &["marc"]
    }

    fn parse(&self, source: &str) -> Result<Value, FormatError> {
        evaluate(source).map_err(|e| parse_error(e, source))
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        MarcSerializer::new(self.rules.clone()).serialize(tree)
    }
}
