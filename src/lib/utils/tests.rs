use std::path::Path;

use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{has_extension, normalize_segments, normalize_text, strip_extension};

const NBSP: char = '\u{a0}';

#[test]
fn normalize_text_collapses_whitespace() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&"[ a-z\t\n\u{a0}]*", |s| {
            let out = normalize_text(&s);
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.contains(NBSP));
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert_eq!(normalize_text(&out), out.clone());
            Ok(())
        })
        .unwrap();
}

#[test]
fn normalize_text_handles_nbsp() {
    assert_eq!(normalize_text("  Has\u{a0}agent \n  name "), "Has agent name");
    assert_eq!(normalize_text(""), "");
}

#[test]
fn normalize_segments_never_escapes_root() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    let segment = prop_oneof![
        "[a-z0-9]{1,6}",
        Just("..".to_string()),
        Just(".".to_string()),
    ];
    runner
        .run(
            &proptest::collection::vec(segment, 0..8),
            |segments| {
                let out = normalize_segments(&segments.join("/"));
                prop_assert!(!out.starts_with('/'));
                prop_assert!(!out.split('/').any(|s| s == ".." || s == "."));
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn normalize_segments_resolves_parents() {
    assert_eq!(normalize_segments("attributes/../intro/./i001"), "intro/i001");
    assert_eq!(normalize_segments("/relationships//1005"), "relationships/1005");
}

#[test]
fn strip_extension_only_touches_last_segment() {
    assert_eq!(strip_extension("attributes/1022.html"), "attributes/1022");
    assert_eq!(strip_extension("v1.2/page"), "v1.2/page");
    assert_eq!(strip_extension("a/.hidden"), "a/.hidden");
    assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
}

#[test]
fn has_extension_matches_listed() {
    let exts = vec!["md".to_string(), "mdx".to_string()];
    assert!(has_extension(Path::new("docs/a.mdx"), &exts));
    assert!(has_extension(Path::new("docs/a.md"), &exts));
    assert!(!has_extension(Path::new("docs/a.html"), &exts));
    assert!(!has_extension(Path::new("docs/README"), &exts));
}
