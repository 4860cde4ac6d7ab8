//! Front matter of migrated documents.
//!
//! A document is an optional YAML block between two `---` lines followed by
//! free-form body text. Sidebar fields are held in an explicit record
//! ([`SidebarMeta`]); every other key is carried through untouched in its
//! original position. A document whose fields did not change renders back to
//! its exact original text.

use color_eyre::Section;
use serde_yaml::{Mapping, Value};
use tracing::error;

const DELIMITER: &str = "---";
const PREFIX_KEY: &str = "sidebar_prefix";

/// Front-matter keys the migration tools read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Label,
    Level,
    Position,
    ClassName,
    Category,
    CustomProps,
    Slug,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Label,
        Field::Level,
        Field::Position,
        Field::ClassName,
        Field::Category,
        Field::CustomProps,
        Field::Slug,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Field::Label => "sidebar_label",
            Field::Level => "sidebar_level",
            Field::Position => "sidebar_position",
            Field::ClassName => "sidebar_class_name",
            Field::Category => "sidebar_category",
            Field::CustomProps => "customProps",
            Field::Slug => "slug",
        }
    }

    fn from_key(key: &Value) -> Option<Self> {
        let key = key.as_str()?;
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Key ordering and pruning rules applied when a header is serialized.
#[derive(Clone, Copy, Debug)]
pub struct RenderStyle {
    /// Emitted first, in this order. Other keys follow in original order,
    /// then keys that were newly added.
    pub priority: &'static [Field],
    /// Drop `customProps` when it holds nothing.
    pub prune_empty_custom_props: bool,
}

impl RenderStyle {
    pub const NAVIGATION: Self = Self {
        priority: &[
            Field::Label,
            Field::Level,
            Field::Position,
            Field::ClassName,
            Field::Category,
            Field::CustomProps,
        ],
        prune_empty_custom_props: true,
    };

    pub const NORMALIZE: Self = Self {
        priority: &[Field::Slug, Field::ClassName],
        prune_empty_custom_props: false,
    };
}

/// Sidebar-related front-matter fields plus everything else, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SidebarMeta {
    pub label: Option<Value>,
    pub level: Option<Value>,
    pub position: Option<Value>,
    pub class_name: Option<Value>,
    pub category: Option<Value>,
    pub custom_props: Option<Value>,
    pub slug: Option<Value>,
    /// Keys not listed in [`Field`].
    pub extra: Mapping,
    order: Vec<Value>,
}

impl SidebarMeta {
    pub fn from_mapping(mapping: Mapping) -> Self {
        let mut meta = Self::default();
        for (key, value) in mapping {
            meta.order.push(key.clone());
            match Field::from_key(&key) {
                Some(field) => *meta.slot_mut(field) = Some(value),
                None => {
                    meta.extra.insert(key, value);
                }
            }
        }
        meta
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Label => self.label.as_ref(),
            Field::Level => self.level.as_ref(),
            Field::Position => self.position.as_ref(),
            Field::ClassName => self.class_name.as_ref(),
            Field::Category => self.category.as_ref(),
            Field::CustomProps => self.custom_props.as_ref(),
            Field::Slug => self.slug.as_ref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<Value>) {
        *self.slot_mut(field) = value;
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<Value> {
        match field {
            Field::Label => &mut self.label,
            Field::Level => &mut self.level,
            Field::Position => &mut self.position,
            Field::ClassName => &mut self.class_name,
            Field::Category => &mut self.category,
            Field::CustomProps => &mut self.custom_props,
            Field::Slug => &mut self.slug,
        }
    }

    /// `customProps.sidebar_prefix`, when it is a string.
    pub fn prefix(&self) -> Option<&str> {
        match &self.custom_props {
            Some(Value::Mapping(props)) => props.get(PREFIX_KEY).and_then(Value::as_str),
            _ => None,
        }
    }

    /// Set or remove `customProps.sidebar_prefix`.
    ///
    /// Setting replaces a `customProps` that is not a mapping; removing never
    /// creates one.
    pub fn set_prefix(&mut self, prefix: Option<String>) {
        match prefix {
            Some(prefix) => {
                let props = self
                    .custom_props
                    .get_or_insert_with(|| Value::Mapping(Mapping::new()));
                if !props.is_mapping() {
                    *props = Value::Mapping(Mapping::new());
                }
                if let Value::Mapping(props) = props {
                    props.insert(Value::from(PREFIX_KEY), Value::from(prefix));
                }
            }
            None => {
                if let Some(Value::Mapping(props)) = &mut self.custom_props {
                    props.remove(PREFIX_KEY);
                }
            }
        }
    }

    /// Assemble the ordered mapping written to disk.
    pub fn to_mapping(&self, style: RenderStyle) -> Mapping {
        let mut out = Mapping::new();
        let emit = |out: &mut Mapping, field: Field| {
            if out.contains_key(field.key()) {
                return;
            }
            if let Some(value) = self.get(field) {
                if field == Field::CustomProps
                    && style.prune_empty_custom_props
                    && is_blank(value)
                {
                    return;
                }
                out.insert(Value::from(field.key()), value.clone());
            }
        };

        for &field in style.priority {
            emit(&mut out, field);
        }
        for key in &self.order {
            match Field::from_key(key) {
                Some(field) => emit(&mut out, field),
                None => {
                    if let Some(value) = self.extra.get(key) {
                        if !out.contains_key(key) {
                            out.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
        }
        for field in Field::ALL {
            emit(&mut out, field);
        }
        for (key, value) in &self.extra {
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::Mapping(m) => m.is_empty(),
        _ => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
    Absent,
    Present,
    /// A block exists but is not a YAML mapping. Never rewritten.
    Malformed,
}

/// A document split into front matter and body.
#[derive(Clone, Debug)]
pub struct Document {
    pub meta: SidebarMeta,
    parsed: SidebarMeta,
    body: String,
    original: String,
    state: HeaderState,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let whole_text_as_body = |state| Self {
            meta: SidebarMeta::default(),
            parsed: SidebarMeta::default(),
            body: text.to_string(),
            original: text.to_string(),
            state,
        };

        let Some((yaml, body)) = split_front_matter(text) else {
            return whole_text_as_body(HeaderState::Absent);
        };

        let mapping = match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(Value::Null) => Mapping::new(),
            Ok(other) => {
                error!(kind = ?value_kind(&other), "front matter is not a mapping");
                return whole_text_as_body(HeaderState::Malformed);
            }
            Err(e) => {
                error!(error = %e, "front matter is not valid YAML");
                return whole_text_as_body(HeaderState::Malformed);
            }
        };

        let meta = SidebarMeta::from_mapping(mapping);
        Self {
            parsed: meta.clone(),
            meta,
            body: body.to_string(),
            original: text.to_string(),
            state: HeaderState::Present,
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether any field differs from what was read.
    pub fn is_modified(&self) -> bool {
        self.meta != self.parsed
    }

    /// Full file text. Unmodified documents render to their original text.
    pub fn render(&self, style: RenderStyle) -> color_eyre::Result<String> {
        if !self.is_modified() {
            return Ok(self.original.clone());
        }
        let mapping = self.meta.to_mapping(style);
        if mapping.is_empty() {
            return Ok(self.body.clone());
        }
        let yaml = serde_yaml::to_string(&mapping).with_note(|| "While serializing front matter.")?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", self.body))
    }
}

/// Split `text` into the raw YAML between the delimiter lines and the body.
///
/// The first line must be the delimiter; the block ends at the next line
/// that is exactly the delimiter (trailing whitespace allowed).
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if !first.ends_with('\n') || first.trim_end() != DELIMITER {
        return None;
    }
    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some((&text[start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests;
