//! Pure mapping from a document's current sidebar fields and its matching
//! navigation entry (if any) to the fields it should carry.
//!
//! Every assignment has a matching clearing rule, so re-running against the
//! same navigation leaves documents untouched.

use serde_yaml::Value;

use crate::{
    config::SourceLayout,
    header::{Field, SidebarMeta},
    nav::NavEntry,
    types::{ClassTokens, DocKey},
};

pub fn reconcile(
    mut meta: SidebarMeta,
    matched: Option<&NavEntry>,
    key: &DocKey,
    layout: &SourceLayout,
) -> SidebarMeta {
    let Some(entry) = matched else {
        for field in [
            Field::Label,
            Field::Level,
            Field::Position,
            Field::ClassName,
            Field::Category,
        ] {
            meta.set(field, None);
        }
        meta.set_prefix(None);
        return meta;
    };

    meta.set(Field::Label, Some(Value::from(entry.label.as_str())));
    meta.set(Field::Level, Some(Value::from(entry.depth)));
    meta.set(Field::Position, Some(Value::from(entry.position)));

    reconcile_class(&mut meta, entry.depth == 1, &layout.level_1_class);

    match &entry.category {
        Some(category) => meta.set(Field::Category, Some(Value::from(category.as_str()))),
        None if key.is_under(&layout.relationships_dir) => meta.set(Field::Category, None),
        None => {}
    }

    meta.set_prefix(entry.prefix());
    meta
}

/// Keep the top-level class token in step with the entry's depth, leaving
/// any other tokens alone.
fn reconcile_class(meta: &mut SidebarMeta, is_top_level: bool, class: &str) {
    let current = meta
        .get(Field::ClassName)
        .and_then(Value::as_str)
        .map(ClassTokens::parse);

    match (is_top_level, current) {
        (true, Some(mut tokens)) => {
            if tokens.insert(class) {
                meta.set(Field::ClassName, Some(Value::from(tokens.to_string())));
            }
        }
        (true, None) => meta.set(Field::ClassName, Some(Value::from(class))),
        (false, Some(mut tokens)) => {
            if tokens.remove(class) {
                let remaining = (!tokens.is_empty()).then(|| Value::from(tokens.to_string()));
                meta.set(Field::ClassName, remaining);
            }
        }
        (false, None) => {}
    }
}
