//! Every format has to give back the tree it was given.

use crate::common::tree_strategy;
use marc_babel::{BabelConverter, Converter, ErrorKind, FormatKind};
use proptest::prelude::*;
use serde_json::{json, Value};

fn through(converter: &BabelConverter, kind: FormatKind, tree: &Value) -> Value {
    let pivot = tree.to_string();
    let text = converter
        .from_tree(kind, &pivot)
        .unwrap_or_else(|e| panic!("{kind} could not write {pivot}: {e}"));
    let back = converter
        .to_tree(kind, &text)
        .unwrap_or_else(|e| panic!("{kind} could not read back:\n{text}\n{e}"));
    serde_json::from_str(&back).unwrap()
}

#[test]
fn test_all_formats_share_the_example_tree() {
    let converter = BabelConverter::default();
    let tree = json!({
        "materials": {"metal": {"reflectivity": 1.0, "metallic": true}},
        "entities": [{"name": "hero"}, {"name": "monster", "hp": 30}],
        "spawn": [[1, 2], [3]],
        "description": "two\nlines"
    });
    for kind in FormatKind::ALL {
        assert_eq!(through(&converter, kind, &tree), tree, "through {kind}");
    }
}

#[test]
fn test_null_only_fails_table() {
    let converter = BabelConverter::default();
    let tree = r#"{"a": null}"#;
    assert!(converter.from_tree(FormatKind::Primary, tree).is_ok());
    assert!(converter.from_tree(FormatKind::Block, tree).is_ok());
    let err = converter.from_tree(FormatKind::Table, tree).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Serialize);
}

#[test]
fn test_yaml_to_toml_through_pivot() {
    let converter = BabelConverter::default();
    let pivot = converter
        .to_tree(FormatKind::Block, "server:\n  port: 8080\n  hosts:\n    - a\n    - b\n")
        .unwrap();
    let toml = converter.from_tree(FormatKind::Table, &pivot).unwrap();
    let back: Value = serde_json::from_str(&converter.to_tree(FormatKind::Table, &toml).unwrap())
        .unwrap();
    assert_eq!(back, json!({"server": {"port": 8080, "hosts": ["a", "b"]}}));
}

#[test]
fn test_toml_datetime_is_read() {
    let converter = BabelConverter::default();
    let pivot = converter
        .to_tree(FormatKind::Table, "when = 1979-05-27T07:32:00Z\n")
        .unwrap();
    assert!(pivot.contains("1979-05-27T07:32:00Z"));
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_pivot_consistency(tree in tree_strategy()) {
            let converter = BabelConverter::default();
            for kind in FormatKind::ALL {
                prop_assert_eq!(&through(&converter, kind, &tree), &tree, "through {}", kind);
            }
        }
    }
}
