//! Property tests over serialized and hand-mangled MARC

use crate::common::tree_strategy;
use marc_babel::format::Format;
use marc_babel::formats::marc::MarcFormat;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Spread a canonical document out with extra whitespace and blank lines. Lines inside
/// multi-line strings are left alone.
fn mangle(text: &str, blanks: usize) -> String {
    let spacer = "\n".repeat(blanks);
    let mut out = String::new();
    let mut closer: Option<&str> = None;
    for line in text.lines() {
        match closer {
            Some(end) => {
                out.push_str(line);
                out.push('\n');
                if line == end {
                    closer = None;
                    out.push_str(&spacer);
                }
            }
            None => {
                out.push_str(&line.replacen(" = ", "   =\t", 1));
                out.push('\n');
                closer = ["'''", "\"\"\""]
                    .into_iter()
                    .find(|quotes| line.ends_with(&format!(" = {quotes}")));
                if closer.is_none() {
                    out.push_str(&spacer);
                }
            }
        }
    }
    out
}

#[test]
fn test_mangle_keeps_block_strings_intact() {
    let format = MarcFormat::default();
    let tree = json!({"a": "one\ntwo", "b": "x\t'''\ny"});
    let text = format.serialize(&tree).unwrap();
    assert_eq!(
        text,
        ".a = '''\none\ntwo\n'''\n\n.b = \"\"\"\nx\\t'''\ny\n\"\"\"\n"
    );

    let messy = mangle(&text, 2);
    assert!(messy.contains("one\ntwo\n'''\n\n\n"));
    assert_eq!(format.parse(&messy).unwrap(), tree);
    assert_eq!(format.canonicalize(&messy).unwrap(), text);
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_serialized_text_is_canonical(tree in tree_strategy()) {
            let format = MarcFormat::default();
            let text = format.serialize(&tree).unwrap();
            prop_assert_eq!(format.canonicalize(&text).unwrap(), text.clone());
            prop_assert_eq!(format.parse(&text).unwrap(), tree);
        }

        #[test]
        fn test_canonicalize_is_idempotent(tree in tree_strategy(), blanks in 0usize..4) {
            let format = MarcFormat::default();
            let messy = mangle(&format.serialize(&tree).unwrap(), blanks);
            let once = format.canonicalize(&messy).unwrap();
            prop_assert_eq!(format.canonicalize(&once).unwrap(), once.clone());
            let reparsed: Value = format.parse(&once).unwrap();
            prop_assert_eq!(reparsed, tree);
        }
    }
}
