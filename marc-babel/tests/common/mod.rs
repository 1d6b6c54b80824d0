//! Shared strategies for property tests

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

/// Scalars every format can hold. `null` is left out since TOML has no way to write it.
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-100_000i64..100_000).prop_map(|n| Value::Number(n.into())),
        (-4000i32..4000).prop_map(|n| {
            Number::from_f64(f64::from(n) / 8.0)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }),
        "[a-zA-Z0-9 _'\"#.\\\\-]{0,12}".prop_map(Value::String),
        "[a-zé \t\n'\"\\\\]{0,12}".prop_map(Value::String),
        "[a-z ]{0,3}'''[a-z\n]{0,3}".prop_map(Value::String),
    ]
}

pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[a-z][a-z0-9_]{0,6}", "[a-z0-9][a-z0-9 -]{0,6}"]
}

/// Non-empty containers of scalars, nested a few levels deep.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Value::Array),
            prop::collection::vec((key_strategy(), inner), 1..4).prop_map(object),
        ]
    })
}

/// A document tree: an object at the root, as TOML requires.
pub fn tree_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec((key_strategy(), value_strategy()), 1..5).prop_map(object)
}

fn object(entries: Vec<(String, Value)>) -> Value {
    Value::Object(entries.into_iter().collect::<Map<String, Value>>())
}
