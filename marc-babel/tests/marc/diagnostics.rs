//! Error reporting for invalid MARC documents

use marc_babel::formats::marc::diagnostics::{EvaluateError, MarcError, SyntaxError, ValueType};
use marc_babel::formats::marc::evaluate;

#[test]
fn test_type_mismatch_points_at_both_accesses() {
    let source = ".player.name = 'Gandalf'\n.player[i] = 1\n";
    let err = evaluate(source).unwrap_err();
    let MarcError::Evaluate(EvaluateError::TypeMismatch {
        expected,
        expected_at,
        actual,
        actual_at,
    }) = &err
    else {
        panic!("Expected TypeMismatch, got {err:?}");
    };
    assert_eq!(*expected, ValueType::Object);
    assert_eq!(&source[expected_at.clone()], ".name");
    assert_eq!(*actual, ValueType::Array);
    assert_eq!(&source[actual_at.clone()], "[i]");

    let rendered = err.render(source);
    assert!(rendered.contains("Type mismatch"));
    assert!(rendered.contains("first inferred as Object"));
    assert!(rendered.contains("treats it as Array"));
}

#[test]
fn test_last_element_help() {
    let source = ".items[ ].name = 'sword'\n";
    let err = evaluate(source).unwrap_err();
    assert_eq!(
        err,
        MarcError::Evaluate(EvaluateError::LastElementNotFound {
            span: 6..9,
            container: ValueType::Array,
        })
    );
    let rendered = err.render(source);
    assert!(rendered.contains("Last element not found"));
    assert!(rendered.contains("change `[ ]` to `[i]`"));
}

#[test]
fn test_unknown_character() {
    let source = ".a = 1\n.b = @\n";
    let err = evaluate(source).unwrap_err();
    assert_eq!(err, MarcError::Syntax(SyntaxError::UnknownCharacter { span: 12..13 }));
    assert!(err.render(source).contains("unexpected character"));
}

#[test]
fn test_unterminated_string() {
    let err = evaluate(".a = 'open\n").unwrap_err();
    assert!(matches!(err, MarcError::Syntax(SyntaxError::UnknownCharacter { .. })));
}

#[test]
fn test_render_handles_multibyte_source() {
    let source = ".a = 'é'\n.a = 'ü'\n";
    let rendered = evaluate(source).unwrap_err().render(source);
    assert!(rendered.contains("Duplicate assignment"));
    assert!(rendered.contains(".a = 'ü'"));
}
