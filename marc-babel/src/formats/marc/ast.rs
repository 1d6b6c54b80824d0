//! Syntax tree of a marc document
//!
//! A document is a flat list of line statements. Literal values are already decoded (escapes
//! resolved, block strings trimmed), so the tree carries no trace of the string style used in
//! the source; the canonical printer chooses the style from the value alone.

use super::lexer::Span;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Blank,
    /// Comment text without the leading `#`, trimmed
    Comment(String),
    Entry(Entry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub accesses: Vec<Access>,
    pub value: Literal,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Access {
    pub kind: AccessKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessKind {
    /// `.key`
    Field(String),
    /// `{key}`
    MapKey(String),
    /// `[i]`
    Push,
    /// `[ ]`
    Last,
    /// `[key]`
    Keyed(String),
    /// `(i)`
    TuplePush,
    /// `( )`
    TupleLast,
}

/// A scalar value with the span it was written at
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub span: Span,
}
