//! Errors raised while reading marc source, and their rendering
//!
//! Every error carries byte spans into the source. [`MarcError::render`] turns them into an
//! annotated snippet (via `ariadne`, without colour) which is what editors show in place of the
//! converted content.

use super::lexer::Span;
use ariadne::{Config, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

const SOURCE_ID: &str = "input.marc";

/// The type a value or container was inferred as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Object,
    Map,
    Array,
    Tuple,
    String,
    Integer,
    Decimal,
    Boolean,
    Null,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Object => "Object",
            ValueType::Map => "Map",
            ValueType::Array => "Array",
            ValueType::Tuple => "Tuple",
            ValueType::String => "String",
            ValueType::Integer => "Integer",
            ValueType::Decimal => "Decimal",
            ValueType::Boolean => "Boolean",
            ValueType::Null => "Null",
        };
        f.write_str(name)
    }
}

/// The source is not well-formed marc.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("unexpected character")]
    UnknownCharacter { span: Span },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        span: Span,
        expected: String,
        found: String,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { offset: usize, expected: String },

    #[error("{message}")]
    InvalidLiteral { span: Span, message: String },
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::UnknownCharacter { span }
            | SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::InvalidLiteral { span, .. } => span.clone(),
            SyntaxError::UnexpectedEof { offset, .. } => *offset..*offset,
        }
    }
}

/// The source is well-formed, but its entries do not describe one consistent tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluateError {
    #[error("this access treats the parent value as {actual}, but it was inferred as {expected}")]
    TypeMismatch {
        expected: ValueType,
        expected_at: Span,
        actual: ValueType,
        actual_at: Span,
    },

    #[error("last {container} element not found")]
    LastElementNotFound { span: Span, container: ValueType },

    #[error("a value was already assigned at this path")]
    DuplicateAssignment { previous: Span, current: Span },

    #[error("this access nests the value deeper than {limit} levels")]
    TooDeep { span: Span, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarcError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("evaluation error: {0}")]
    Evaluate(#[from] EvaluateError),
}

impl MarcError {
    /// One-line headline of the diagnostic.
    pub fn title(&self) -> &'static str {
        match self {
            MarcError::Syntax(SyntaxError::InvalidLiteral { .. }) => "Invalid literal",
            MarcError::Syntax(_) => "Syntax error",
            MarcError::Evaluate(EvaluateError::TypeMismatch { .. }) => "Type mismatch",
            MarcError::Evaluate(EvaluateError::LastElementNotFound { .. }) => {
                "Last element not found"
            }
            MarcError::Evaluate(EvaluateError::DuplicateAssignment { .. }) => {
                "Duplicate assignment"
            }
            MarcError::Evaluate(EvaluateError::TooDeep { .. }) => "Nesting too deep",
        }
    }

    fn labels(&self) -> Vec<(Span, String)> {
        match self {
            MarcError::Syntax(err) => vec![(err.span(), err.to_string())],
            MarcError::Evaluate(EvaluateError::TypeMismatch {
                expected,
                expected_at,
                actual,
                actual_at,
            }) => vec![
                (
                    expected_at.clone(),
                    format!("the parent value was first inferred as {expected} here"),
                ),
                (
                    actual_at.clone(),
                    format!("this access treats it as {actual}"),
                ),
            ],
            MarcError::Evaluate(EvaluateError::LastElementNotFound { span, container }) => {
                vec![(span.clone(), format!("this {container} has no element yet"))]
            }
            MarcError::Evaluate(EvaluateError::DuplicateAssignment { previous, current }) => vec![
                (
                    previous.clone(),
                    "a value was previously assigned at this path".to_string(),
                ),
                (
                    current.clone(),
                    "assigning the same path again is not allowed".to_string(),
                ),
            ],
            MarcError::Evaluate(EvaluateError::TooDeep { span, limit }) => {
                vec![(span.clone(), format!("this access goes past {limit} levels"))]
            }
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            MarcError::Evaluate(EvaluateError::LastElementNotFound {
                container: ValueType::Tuple,
                ..
            }) => Some("change `( )` to `(i)` to start a new element"),
            MarcError::Evaluate(EvaluateError::LastElementNotFound { .. }) => {
                Some("change `[ ]` to `[i]` to start a new element")
            }
            _ => None,
        }
    }

    /// Render the error as an annotated snippet of `source`.
    pub fn render(&self, source: &str) -> String {
        let labels: Vec<_> = self
            .labels()
            .into_iter()
            .map(|(span, message)| (char_span(source, &span), message))
            .collect();
        let offset = labels.last().map(|(span, _)| span.start).unwrap_or(0);

        let mut report = Report::build(ReportKind::Error, SOURCE_ID, offset)
            .with_config(Config::default().with_color(false))
            .with_message(self.title());
        for (span, message) in labels {
            report = report.with_label(Label::new((SOURCE_ID, span)).with_message(message));
        }
        if let Some(help) = self.help() {
            report = report.with_help(help);
        }

        let mut output = Vec::new();
        match report
            .finish()
            .write((SOURCE_ID, Source::from(source)), &mut output)
        {
            Ok(()) => String::from_utf8(output).unwrap_or_else(|_| self.to_string()),
            Err(_) => self.to_string(),
        }
    }
}

/// ariadne counts characters, spans count bytes.
fn char_span(source: &str, span: &Span) -> Span {
    let to_chars = |byte: usize| {
        let byte = byte.min(source.len());
        source
            .get(..byte)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(byte)
    };
    to_chars(span.start)..to_chars(span.end)
}
