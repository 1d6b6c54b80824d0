//! Editing sessions starting from the initial document

use marc_babel::{ErrorKind, FormatKind, SyncHub};
use serde_json::Value;

fn tree_of(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_broken_tree_edit_fails_everything_else() {
    let hub: SyncHub = SyncHub::default();
    let doc = hub.initial().unwrap();
    let doc = hub.transition(doc, FormatKind::Tree, "{");

    let tree = doc.slot(FormatKind::Tree);
    assert_eq!(tree.text, "{");
    assert!(!tree.is_error());
    for kind in [FormatKind::Primary, FormatKind::Block, FormatKind::Table] {
        let slot = doc.slot(kind);
        assert_eq!(slot.error().map(|e| e.kind), Some(ErrorKind::Parse), "{kind}");
        assert!(slot.text.contains("EOF"), "{kind}: {}", slot.text);
    }
}

#[test]
fn test_fixing_the_tree_recovers_every_slot() {
    let hub: SyncHub = SyncHub::default();
    let doc = hub.initial().unwrap();
    let doc = hub.transition(doc, FormatKind::Tree, "{");
    let doc = hub.transition(doc, FormatKind::Tree, r#"{"name": "hero", "hp": 30}"#);

    assert!(!doc.has_errors());
    assert_eq!(doc.text(FormatKind::Primary), ".name = 'hero'\n\n.hp = 30\n");
    assert_eq!(doc.text(FormatKind::Block), "name: hero\nhp: 30\n");
    assert_eq!(doc.text(FormatKind::Table), "name = \"hero\"\nhp = 30\n");
}

#[test]
fn test_reformat_only_touches_non_canonical_primary() {
    let hub: SyncHub = SyncHub::default();
    let initial = hub.initial().unwrap();
    let formatted = hub.reformat(initial.clone());

    assert_ne!(
        formatted.text(FormatKind::Primary),
        initial.text(FormatKind::Primary)
    );
    assert!(formatted
        .text(FormatKind::Primary)
        .contains(".materials{metal}.metallic = true"));
    assert_eq!(formatted.text(FormatKind::Tree), initial.text(FormatKind::Tree));
    assert_eq!(formatted.text(FormatKind::Block), initial.text(FormatKind::Block));
    assert_eq!(formatted.text(FormatKind::Table), initial.text(FormatKind::Table));
    assert_eq!(formatted.origin(), Some(FormatKind::Primary));

    let again = hub.reformat(formatted.clone());
    assert_eq!(again, formatted);
}

#[test]
fn test_reformat_of_invalid_primary_keeps_document() {
    let hub: SyncHub = SyncHub::default();
    let doc = hub.initial().unwrap();
    let doc = hub.transition(doc, FormatKind::Primary, ".a = 1\n.a = 2\n");
    let unchanged = hub.reformat(doc.clone());
    assert_eq!(unchanged, doc);
}

#[test]
fn test_edits_from_each_side_agree() {
    let hub: SyncHub = SyncHub::default();
    let from_yaml = hub.transition(
        hub.initial().unwrap(),
        FormatKind::Block,
        "levels:\n  - title: Shire\n  - title: Doom\n",
    );
    let from_toml = hub.transition(
        hub.initial().unwrap(),
        FormatKind::Table,
        "[[levels]]\ntitle = \"Shire\"\n\n[[levels]]\ntitle = \"Doom\"\n",
    );
    assert!(!from_yaml.has_errors());
    assert!(!from_toml.has_errors());
    assert_eq!(
        tree_of(from_yaml.text(FormatKind::Tree)),
        tree_of(from_toml.text(FormatKind::Tree))
    );
    assert_eq!(
        from_yaml.text(FormatKind::Primary),
        ".levels[i].title = 'Shire'\n.levels[i].title = 'Doom'\n"
    );
}

#[test]
fn test_tree_edit_keeps_text_verbatim() {
    let hub: SyncHub = SyncHub::default();
    let typed = "{ \"a\" :1 }";
    let doc = hub.transition(hub.initial().unwrap(), FormatKind::Tree, typed);
    assert_eq!(doc.text(FormatKind::Tree), typed);
    assert_eq!(doc.text(FormatKind::Primary), ".a = 1\n");
}
