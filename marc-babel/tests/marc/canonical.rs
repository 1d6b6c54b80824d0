//! Canonical formatting of whole documents

use insta::assert_snapshot;
use marc_babel::formats::marc::formatting_rules::FormattingRules;
use marc_babel::formats::marc::MarcFormat;
use marc_babel::sync::EXAMPLE;

#[test]
fn test_canonical_example() {
    let formatted = MarcFormat::default().canonicalize(EXAMPLE).unwrap();
    assert_snapshot!(formatted, @r###"
    # Map
    .materials{"Infinity stones"}."soul affinity" = 'fire'
    .materials{metal}.reflectivity = 1.0
    .materials{metal}.metallic = true
    .materials{plastic}.reflectivity = 0.5
    .materials{plastic}.conductivity = -1

    # Array of objects
    .entities[i].material = 'metal'
    .entities[ ].name = 'hero'

    .entities[i].name = 'monster'
    .entities[ ].material = 'plastic'

    # Array with explicit keys
    .levels[intro].title = 'The Shire'
    .levels[finale].title = 'Mount Doom'
    .levels[intro].enemies = 0

    # Tuple
    .spawn(i) = 10
    .spawn(i) = 64
    .spawn(i) = -3

    # Raw strings keep backslashes
    .paths.saves = 'C:\Games\saves'

    # Multiline string
    .description = '''
    These are common materials.
    They are found on Earth.
    '''
    "###);
}

#[test]
fn test_canonical_example_is_stable() {
    let format = MarcFormat::default();
    let once = format.canonicalize(EXAMPLE).unwrap();
    assert_eq!(format.canonicalize(&once).unwrap(), once);
}

#[test]
fn test_blank_line_limit_is_configurable() {
    let source = ".a = 1\n\n\n\n.b = 2\n";
    let tight = MarcFormat::new(FormattingRules {
        max_blank_lines: 0,
        ..FormattingRules::default()
    });
    assert_eq!(tight.canonicalize(source).unwrap(), ".a = 1\n.b = 2\n");

    let loose = MarcFormat::new(FormattingRules {
        max_blank_lines: 2,
        ..FormattingRules::default()
    });
    assert_eq!(loose.canonicalize(source).unwrap(), ".a = 1\n\n\n.b = 2\n");
}

#[test]
fn test_escaped_strings_without_raw_preference() {
    let format = MarcFormat::new(FormattingRules {
        prefer_raw_strings: false,
        ..FormattingRules::default()
    });
    assert_eq!(
        format.canonicalize(".path = 'C:\\temp'\n").unwrap(),
        ".path = \"C:\\\\temp\"\n"
    );
}

#[test]
fn test_comments_are_kept_in_place() {
    let source = "#top\n.a = 1   #  trailing  \n#\n.b = 2\n";
    assert_eq!(
        MarcFormat::default().canonicalize(source).unwrap(),
        "# top\n.a = 1 # trailing\n#\n.b = 2\n"
    );
}

#[test]
fn test_comment_content_survives_formatting() {
    let format = MarcFormat::default();
    let once = format.canonicalize("##x\n.a = 1 ##note\n").unwrap();
    assert_eq!(once, "# #x\n.a = 1 # #note\n");
    assert_eq!(format.canonicalize(&once).unwrap(), once);
}

#[test]
fn test_bracket_forms_are_normalized() {
    let source = ".xs[i] = 1\n.xs[] = 2\n.ys[\"i\"] = 3\n.zs[\"plain\"] = 4\n";
    let err = MarcFormat::default().canonicalize(source);
    assert!(err.is_err(), "`.xs[]` revisits the scalar 1");

    let source = ".xs[i].a = 1\n.xs[].b = 2\n.ys[\"i\"] = 3\n.zs[\"plain\"] = 4\n";
    assert_eq!(
        MarcFormat::default().canonicalize(source).unwrap(),
        ".xs[i].a = 1\n.xs[ ].b = 2\n.ys[\"i\"] = 3\n.zs[plain] = 4\n"
    );
}
