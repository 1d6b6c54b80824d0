//! Evaluation of marc entries into a tree
//!
//! Entries are applied in order to a root node that starts uninitialized. The first access that
//! reaches a node decides its container type; every later access has to agree with it. Each node
//! remembers the span where its type was inferred so conflicts can point at both sides.

use super::ast::{AccessKind, Access, Entry, Literal, Statement};
use super::diagnostics::{EvaluateError, ValueType};
use super::lexer::Span;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Deepest container nesting an entry may produce, counting the root. One below the
/// recursion limit of `serde_json`, so every evaluated tree reads back from its JSON text.
pub const MAX_DEPTH: usize = 127;

/// Evaluate the entries of a parsed document. An empty document is an empty object.
pub fn evaluate(statements: &[Statement]) -> Result<Value, EvaluateError> {
    let mut root = Node::uninitialized();
    for statement in statements {
        if let Statement::Entry(Entry {
            accesses, value, ..
        }) = statement
        {
            if let Some(access) = accesses.get(MAX_DEPTH) {
                return Err(EvaluateError::TooDeep {
                    span: access.span.clone(),
                    limit: MAX_DEPTH,
                });
            }
            root.set(accesses, Node::scalar(value))?;
        }
    }
    Ok(root.into_json())
}

struct Node {
    kind: NodeKind,
    inferred_at: Span,
}

enum NodeKind {
    Uninitialized,
    Scalar(Value),
    Object(IndexMap<String, Node>),
    Map(IndexMap<String, Node>),
    Array(Sequence),
    Tuple(Sequence),
}

#[derive(Default)]
struct Sequence {
    items: Vec<Node>,
    keys: HashMap<String, usize>,
}

impl Sequence {
    fn push_new(&mut self) -> &mut Node {
        self.items.push(Node::uninitialized());
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    fn keyed(&mut self, key: &str) -> &mut Node {
        let index = match self.keys.get(key) {
            Some(index) => *index,
            None => {
                self.items.push(Node::uninitialized());
                let index = self.items.len() - 1;
                self.keys.insert(key.to_string(), index);
                index
            }
        };
        &mut self.items[index]
    }

    fn into_json(self) -> Value {
        Value::Array(self.items.into_iter().map(Node::into_json).collect())
    }
}

impl Node {
    fn uninitialized() -> Self {
        Node {
            kind: NodeKind::Uninitialized,
            inferred_at: 0..0,
        }
    }

    fn scalar(literal: &Literal) -> Self {
        Node {
            kind: NodeKind::Scalar(literal.value.clone()),
            inferred_at: literal.span.clone(),
        }
    }

    fn set(&mut self, accesses: &[Access], value: Node) -> Result<(), EvaluateError> {
        let Some((head, tail)) = accesses.split_first() else {
            if let NodeKind::Uninitialized = self.kind {
                *self = value;
                return Ok(());
            }
            return Err(EvaluateError::DuplicateAssignment {
                previous: self.inferred_at.clone(),
                current: value.inferred_at,
            });
        };

        if let NodeKind::Uninitialized = self.kind {
            self.kind = NodeKind::container_for(&head.kind);
            self.inferred_at = head.span.clone();
        }

        match (&mut self.kind, &head.kind) {
            (NodeKind::Object(fields), AccessKind::Field(key))
            | (NodeKind::Map(fields), AccessKind::MapKey(key)) => fields
                .entry(key.clone())
                .or_insert_with(Node::uninitialized)
                .set(tail, value),
            (NodeKind::Array(sequence), AccessKind::Push)
            | (NodeKind::Tuple(sequence), AccessKind::TuplePush) => {
                sequence.push_new().set(tail, value)
            }
            (NodeKind::Array(sequence), AccessKind::Keyed(key)) => {
                sequence.keyed(key).set(tail, value)
            }
            (NodeKind::Array(sequence), AccessKind::Last)
            | (NodeKind::Tuple(sequence), AccessKind::TupleLast) => {
                match sequence.items.last_mut() {
                    Some(last) => last.set(tail, value),
                    None => Err(EvaluateError::LastElementNotFound {
                        span: head.span.clone(),
                        container: access_type(&head.kind),
                    }),
                }
            }
            (kind, access) => Err(EvaluateError::TypeMismatch {
                expected: kind.value_type(),
                expected_at: self.inferred_at.clone(),
                actual: access_type(access),
                actual_at: head.span.clone(),
            }),
        }
    }

    fn into_json(self) -> Value {
        match self.kind {
            NodeKind::Uninitialized => Value::Object(Map::new()),
            NodeKind::Scalar(value) => value,
            NodeKind::Object(fields) | NodeKind::Map(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, node)| (key, node.into_json()))
                    .collect(),
            ),
            NodeKind::Array(sequence) | NodeKind::Tuple(sequence) => sequence.into_json(),
        }
    }
}

impl NodeKind {
    fn container_for(access: &AccessKind) -> NodeKind {
        match access {
            AccessKind::Field(_) => NodeKind::Object(IndexMap::new()),
            AccessKind::MapKey(_) => NodeKind::Map(IndexMap::new()),
            AccessKind::Push | AccessKind::Last | AccessKind::Keyed(_) => {
                NodeKind::Array(Sequence::default())
            }
            AccessKind::TuplePush | AccessKind::TupleLast => NodeKind::Tuple(Sequence::default()),
        }
    }

    fn value_type(&self) -> ValueType {
        match self {
            NodeKind::Object(_) | NodeKind::Uninitialized => ValueType::Object,
            NodeKind::Map(_) => ValueType::Map,
            NodeKind::Array(_) => ValueType::Array,
            NodeKind::Tuple(_) => ValueType::Tuple,
            NodeKind::Scalar(Value::String(_)) => ValueType::String,
            NodeKind::Scalar(Value::Number(n)) if n.is_f64() => ValueType::Decimal,
            NodeKind::Scalar(Value::Number(_)) => ValueType::Integer,
            NodeKind::Scalar(Value::Bool(_)) => ValueType::Boolean,
            NodeKind::Scalar(_) => ValueType::Null,
        }
    }
}

fn access_type(access: &AccessKind) -> ValueType {
    match access {
        AccessKind::Field(_) => ValueType::Object,
        AccessKind::MapKey(_) => ValueType::Map,
        AccessKind::Push | AccessKind::Last | AccessKind::Keyed(_) => ValueType::Array,
        AccessKind::TuplePush | AccessKind::TupleLast => ValueType::Tuple,
    }
}
