//! Failures stay in the slot they belong to

use marc_babel::formats::marc::eval::MAX_DEPTH;
use marc_babel::{Document, ErrorKind, FormatKind, SyncHub};

#[test]
fn test_null_fails_only_the_table() {
    let hub: SyncHub = SyncHub::default();
    let doc = hub.transition(Document::empty(), FormatKind::Tree, r#"{"a": null}"#);

    assert_eq!(doc.text(FormatKind::Primary), ".a = null\n");
    assert_eq!(doc.text(FormatKind::Block), "a: null\n");
    let table = doc.slot(FormatKind::Table);
    assert_eq!(table.error().map(|e| e.kind), Some(ErrorKind::Serialize));
    assert_eq!(table.text, table.error().unwrap().message);
}

#[test]
fn test_scalar_root_fails_marc_and_toml() {
    let hub: SyncHub = SyncHub::default();
    let doc = hub.transition(Document::empty(), FormatKind::Tree, "42");

    assert_eq!(doc.text(FormatKind::Block), "42\n");
    assert!(doc.slot(FormatKind::Primary).is_error());
    assert!(doc.slot(FormatKind::Table).is_error());
    assert!(!doc.slot(FormatKind::Tree).is_error());
}

#[test]
fn test_empty_container_fails_only_marc() {
    let hub: SyncHub = SyncHub::default();
    let doc = hub.transition(Document::empty(), FormatKind::Tree, r#"{"tags": []}"#);

    let primary = doc.slot(FormatKind::Primary);
    assert_eq!(primary.error().map(|e| e.kind), Some(ErrorKind::Serialize));
    assert!(primary.text.contains("`.tags`"));
    assert!(!doc.slot(FormatKind::Block).is_error());
    assert_eq!(doc.text(FormatKind::Table), "tags = []\n");
}

#[test]
fn test_invalid_marc_fails_all_derived_slots() {
    let hub: SyncHub = SyncHub::default();
    let source = ".hp = 10\n.hp = 20\n";
    let doc = hub.transition(Document::empty(), FormatKind::Primary, source);

    assert_eq!(doc.text(FormatKind::Primary), source);
    assert!(!doc.slot(FormatKind::Primary).is_error());
    let messages: Vec<_> = [FormatKind::Tree, FormatKind::Block, FormatKind::Table]
        .into_iter()
        .map(|kind| doc.slot(kind).error().cloned().unwrap())
        .collect();
    assert!(messages.iter().all(|e| e.kind == ErrorKind::Parse));
    assert!(messages.iter().all(|e| e == &messages[0]));
    assert!(messages[0].message.contains("Duplicate assignment"));
}

#[test]
fn test_empty_primary_is_an_empty_object() {
    let hub: SyncHub = SyncHub::default();
    let doc = hub.transition(Document::empty(), FormatKind::Primary, "");

    assert!(!doc.has_errors());
    assert_eq!(doc.text(FormatKind::Tree), "{}");
    assert_eq!(doc.text(FormatKind::Block), "{}\n");
    assert_eq!(doc.text(FormatKind::Table), "");
}

fn chain(depth: usize) -> String {
    format!("{} = 1\n", ".a".repeat(depth))
}

#[test]
fn test_very_deep_primary_fails_the_pivot() {
    let hub: SyncHub = SyncHub::default();
    let source = chain(5_000);
    let doc = hub.transition(Document::empty(), FormatKind::Primary, &source);

    assert_eq!(doc.text(FormatKind::Primary), source);
    for kind in [FormatKind::Tree, FormatKind::Block, FormatKind::Table] {
        let error = doc.slot(kind).error().cloned().unwrap();
        assert_eq!(error.kind, ErrorKind::Parse, "{kind}");
        assert!(error.message.contains("Nesting too deep"), "{kind}");
    }
}

#[test]
fn test_depth_limit_keeps_the_pivot_readable() {
    let hub: SyncHub = SyncHub::default();

    let deepest = hub.transition(Document::empty(), FormatKind::Primary, &chain(MAX_DEPTH));
    assert!(!deepest.has_errors());
    let reread = hub.transition(
        Document::empty(),
        FormatKind::Tree,
        deepest.text(FormatKind::Tree),
    );
    assert!(!reread.has_errors());
    assert_eq!(reread.text(FormatKind::Primary), chain(MAX_DEPTH));

    for depth in [MAX_DEPTH + 1, MAX_DEPTH + 2] {
        let doc = hub.transition(Document::empty(), FormatKind::Primary, &chain(depth));
        let errors: Vec<_> = [FormatKind::Tree, FormatKind::Block, FormatKind::Table]
            .into_iter()
            .map(|kind| doc.slot(kind).error().cloned().unwrap())
            .collect();
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Parse));
        assert!(errors.iter().all(|e| e == &errors[0]));
    }
}
