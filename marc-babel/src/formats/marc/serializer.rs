//! Tree to marc serialization
//!
//! The tree is flattened into one entry per scalar leaf. Objects become `.key` accesses. Array
//! elements open with `[i]` on their first entry and continue with `[ ]`, so an element holding
//! several leaves reads as one block. Top-level keys (or top-level elements) form groups that
//! are separated by blank lines.
//!
//! Empty objects and arrays produce no entry at all, so they cannot survive the trip; the same
//! goes for a bare scalar root. Those trees are rejected rather than silently changed, with the
//! exception of the empty root object, which is simply the empty document.

use super::ast::AccessKind;
use super::formatting_rules::FormattingRules;
use super::printer::{join_lines, print_access, print_entry};
use crate::error::FormatError;
use serde_json::Value;

pub struct MarcSerializer {
    rules: FormattingRules,
}

impl MarcSerializer {
    pub fn new(rules: FormattingRules) -> Self {
        Self { rules }
    }

    pub fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        match tree {
            Value::Object(map) if map.is_empty() => return Ok(String::new()),
            Value::Object(_) | Value::Array(_) => {}
            other => {
                return Err(FormatError::SerializationError(format!(
                    "a marc document needs an object or an array at the root, found {}",
                    type_name(other)
                )))
            }
        }

        let mut entries = Vec::new();
        flatten(tree, &mut Vec::new(), &mut entries)?;

        let mut lines = Vec::new();
        let mut previous: Option<&[AccessKind]> = None;
        for (path, value) in &entries {
            if let Some(previous) = previous {
                if starts_group(previous, path) {
                    lines.extend(
                        std::iter::repeat(String::new()).take(self.rules.blank_lines_between_groups),
                    );
                }
            }
            lines.push(print_entry(path, value, None, &self.rules));
            previous = Some(path);
        }
        Ok(join_lines(lines))
    }
}

type Leaf<'a> = (Vec<AccessKind>, &'a Value);

fn flatten<'a>(
    value: &'a Value,
    prefix: &mut Vec<AccessKind>,
    out: &mut Vec<Leaf<'a>>,
) -> Result<(), FormatError> {
    match value {
        Value::Object(map) if map.is_empty() => Err(unrepresentable("object", prefix)),
        Value::Array(items) if items.is_empty() => Err(unrepresentable("array", prefix)),
        Value::Object(map) => {
            for (key, child) in map {
                prefix.push(AccessKind::Field(key.clone()));
                flatten(child, prefix, out)?;
                prefix.pop();
            }
            Ok(())
        }
        Value::Array(items) => {
            let depth = prefix.len();
            for item in items {
                let first = out.len();
                prefix.push(AccessKind::Push);
                flatten(item, prefix, out)?;
                prefix.pop();
                for (path, _) in out.iter_mut().skip(first + 1) {
                    path[depth] = AccessKind::Last;
                }
            }
            Ok(())
        }
        scalar => {
            out.push((prefix.clone(), scalar));
            Ok(())
        }
    }
}

fn starts_group(previous: &[AccessKind], path: &[AccessKind]) -> bool {
    match (previous.first(), path.first()) {
        (_, Some(AccessKind::Push)) => true,
        (_, Some(AccessKind::Last)) => false,
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

fn unrepresentable(what: &str, path: &[AccessKind]) -> FormatError {
    if path.is_empty() {
        return FormatError::SerializationError(format!(
            "an empty {what} at the root cannot be written in marc"
        ));
    }
    let location: String = path.iter().map(print_access).collect();
    FormatError::SerializationError(format!(
        "the empty {what} at `{location}` cannot be written in marc"
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
