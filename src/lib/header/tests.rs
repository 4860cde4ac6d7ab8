use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use serde_yaml::Value;

use super::{Document, Field, HeaderState, RenderStyle, split_front_matter};

#[test]
fn split_finds_block_and_body() {
    let text = "---\ntitle: A\n---\n# Body\n---\nnot a header\n";
    let (yaml, body) = split_front_matter(text).unwrap();
    assert_eq!(yaml, "title: A\n");
    assert_eq!(body, "# Body\n---\nnot a header\n");
}

#[test]
fn split_tolerates_trailing_whitespace_and_missing_final_newline() {
    let (yaml, body) = split_front_matter("--- \nid: x\n---").unwrap();
    assert_eq!(yaml, "id: x\n");
    assert_eq!(body, "");
}

#[test]
fn split_requires_opening_and_closing_lines() {
    assert!(split_front_matter("# Title\n---\na: 1\n---\n").is_none());
    assert!(split_front_matter("---\na: 1\n").is_none());
    assert!(split_front_matter("---").is_none());
    assert!(split_front_matter("").is_none());
}

#[test]
fn unmodified_documents_round_trip_exactly() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(
            &(
                proptest::option::of(proptest::collection::vec(("[a-z]{1,8}", "[A-Za-z0-9 ]{0,12}"), 0..5)),
                "[ -~\n]{0,80}",
            ),
            |(header, body)| {
                let text = match header {
                    Some(pairs) => {
                        let yaml: String = pairs
                            .iter()
                            .map(|(k, v)| format!("{k}:   '{v}'\n"))
                            .collect();
                        format!("---\n{yaml}---\n{body}")
                    }
                    None => body.clone(),
                };
                let doc = Document::parse(&text);
                prop_assert!(!doc.is_modified());
                prop_assert_eq!(doc.render(RenderStyle::NAVIGATION).unwrap(), text.clone());
                prop_assert_eq!(doc.render(RenderStyle::NORMALIZE).unwrap(), text);
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn missing_header_means_empty_meta() {
    let doc = Document::parse("# Just a body\n");
    assert_eq!(doc.state(), HeaderState::Absent);
    assert_eq!(doc.body(), "# Just a body\n");
    assert!(doc.meta.label.is_none());
}

#[test]
fn malformed_header_keeps_text_as_body() {
    for text in ["---\nkey: [unclosed\n---\nbody\n", "---\n- a\n- b\n---\nbody\n"] {
        let doc = Document::parse(text);
        assert_eq!(doc.state(), HeaderState::Malformed);
        assert_eq!(doc.body(), text);
        assert_eq!(doc.meta.extra.len(), 0);
        assert_eq!(doc.render(RenderStyle::NAVIGATION).unwrap(), text);
    }
}

#[test]
fn navigation_style_orders_sidebar_keys_first() {
    let text = "---\ntitle: Has title\nsidebar_position: 9\nid: t1\n---\nBody\n";
    let mut doc = Document::parse(text);
    doc.meta.set(Field::Level, Some(Value::from(2)));
    doc.meta.set(Field::Label, Some(Value::from("Has title")));

    assert_eq!(
        doc.render(RenderStyle::NAVIGATION).unwrap(),
        "---\nsidebar_label: Has title\nsidebar_level: 2\nsidebar_position: 9\ntitle: Has title\nid: t1\n---\nBody\n"
    );
}

#[test]
fn prefix_survives_serialization() {
    let mut doc = Document::parse("---\nid: t1\n---\nBody\n");
    doc.meta.set_prefix(Some("│     └─ ".to_string()));
    let rendered = doc.render(RenderStyle::NAVIGATION).unwrap();
    assert!(rendered.starts_with("---\ncustomProps:\n"));
    assert!(rendered.ends_with("id: t1\n---\nBody\n"));

    let reparsed = Document::parse(&rendered);
    assert_eq!(reparsed.meta.prefix(), Some("│     └─ "));
    assert_eq!(reparsed.body(), "Body\n");
}

#[test]
fn normalize_style_puts_slug_and_class_first() {
    let text = "---\nid: a\nsidebar_level: 1\n---\nBody";
    let mut doc = Document::parse(text);
    doc.meta.set(Field::ClassName, Some(Value::from("sidebar-level-1")));
    doc.meta.set(Field::Slug, Some(Value::from("/relationships/agents")));
    assert_eq!(
        doc.render(RenderStyle::NORMALIZE).unwrap(),
        "---\nslug: /relationships/agents\nsidebar_class_name: sidebar-level-1\nid: a\nsidebar_level: 1\n---\nBody"
    );
}

#[test]
fn empty_custom_props_are_pruned_for_navigation() {
    let text = "---\nsidebar_label: A\ncustomProps:\n  sidebar_prefix: '├─ '\n---\n";
    let mut doc = Document::parse(text);
    doc.meta.set_prefix(None);
    assert_eq!(
        doc.render(RenderStyle::NAVIGATION).unwrap(),
        "---\nsidebar_label: A\n---\n"
    );
    assert_eq!(
        doc.render(RenderStyle::NORMALIZE).unwrap(),
        "---\nsidebar_label: A\ncustomProps: {}\n---\n"
    );
}

#[test]
fn clearing_every_field_drops_the_header() {
    let mut doc = Document::parse("---\nsidebar_label: A\n---\nBody\n");
    doc.meta.set(Field::Label, None);
    assert_eq!(doc.render(RenderStyle::NAVIGATION).unwrap(), "Body\n");
}

#[test]
fn set_prefix_replaces_scalar_custom_props() {
    let mut doc = Document::parse("---\ncustomProps: legacy\n---\n");
    doc.meta.set_prefix(Some("├─ ".to_string()));
    assert_eq!(doc.meta.prefix(), Some("├─ "));
    doc.meta.set_prefix(None);
    assert!(doc.meta.custom_props.as_ref().is_some_and(Value::is_mapping));
}
