//! Canonical text for marc statements
//!
//! Shared by the formatter (which reprints a parsed document) and the serializer (which prints
//! entries derived from a tree), so both produce the same layout.

use super::ast::{AccessKind, Statement};
use super::formatting_rules::FormattingRules;
use serde_json::Value;

/// Print a document statement by statement, collapsing blank line runs.
pub fn print_statements(statements: &[Statement], rules: &FormattingRules) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0;
    for statement in statements {
        let line = match statement {
            Statement::Blank => {
                blank_run += 1;
                continue;
            }
            Statement::Comment(text) => print_comment(text),
            Statement::Entry(entry) => print_entry(
                entry.accesses.iter().map(|access| &access.kind),
                &entry.value.value,
                entry.comment.as_deref(),
                rules,
            ),
        };
        if !lines.is_empty() {
            lines.extend(std::iter::repeat(String::new()).take(blank_run.min(rules.max_blank_lines)));
        }
        blank_run = 0;
        lines.push(line);
    }
    join_lines(lines)
}

/// Join lines with a single trailing newline; no lines give the empty document.
pub fn join_lines(lines: Vec<String>) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn print_entry<'a>(
    accesses: impl IntoIterator<Item = &'a AccessKind>,
    value: &Value,
    comment: Option<&str>,
    rules: &FormattingRules,
) -> String {
    let mut line: String = accesses.into_iter().map(print_access).collect();
    line.push_str(" = ");
    line.push_str(&print_scalar(value, rules));
    if let Some(comment) = comment {
        line.push(' ');
        line.push_str(&print_comment(comment));
    }
    line
}

pub fn print_comment(text: &str) -> String {
    if text.is_empty() {
        "#".to_string()
    } else {
        format!("# {text}")
    }
}

pub fn print_access(access: &AccessKind) -> String {
    match access {
        AccessKind::Field(key) => format!(".{}", print_key(key)),
        AccessKind::MapKey(key) => format!("{{{}}}", print_key(key)),
        AccessKind::Push => "[i]".to_string(),
        AccessKind::Last => "[ ]".to_string(),
        AccessKind::Keyed(key) if key == "i" => "[\"i\"]".to_string(),
        AccessKind::Keyed(key) => format!("[{}]", print_key(key)),
        AccessKind::TuplePush => "(i)".to_string(),
        AccessKind::TupleLast => "( )".to_string(),
    }
}

/// Keys are bare when they read back as a single identifier token.
pub fn print_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        format!("\"{}\"", escape(key, false))
    }
}

/// Print a scalar value. Containers never reach an entry's right-hand side.
pub fn print_scalar(value: &Value, rules: &FormattingRules) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => print_string(s, rules),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub fn print_string(s: &str, rules: &FormattingRules) -> String {
    let raw_safe = rules.prefer_raw_strings && !s.chars().any(|c| c.is_control() && c != '\n');
    if !s.contains('\n') {
        if raw_safe && !s.contains('\'') {
            format!("'{s}'")
        } else {
            format!("\"{}\"", escape(s, false))
        }
    } else if raw_safe && !s.contains("'''") {
        format!("'''\n{s}\n'''")
    } else {
        format!("\"\"\"\n{}\n\"\"\"", escape(s, true))
    }
}

/// JSON-style escaping; block strings keep their line breaks.
pub fn escape(s: &str, keep_line_breaks: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' if keep_line_breaks => out.push('\n'),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
