//! Shared data types for the navigation migration.
//! Implemented as newtypes to enforce invariants.

use std::{fmt, path::Path};

use itertools::Itertools;
use tracing::warn;

use crate::utils::{normalize_segments, path_to_slashes, strip_extension};

/// Normalized document identifier: slash-separated, relative, no extension.
///
/// Never empty and never contains `.` or `..` segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocKey(String);

impl DocKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_segments(strip_extension(raw));
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Key of a link target found in the navigation of `section`.
    ///
    /// `source_root` is the absolute source root as a string; hrefs starting
    /// with it or with `legacy_prefix` are rooted, other absolute hrefs are
    /// accepted with a warning and relative ones resolve under `section`.
    pub fn from_href(
        href: &str,
        section: &str,
        source_root: &str,
        legacy_prefix: &str,
    ) -> Option<Self> {
        let href = href.trim();
        if href.is_empty() || is_external(href) {
            return None;
        }
        let href = href.split(['#', '?']).next().unwrap_or_default();
        if href.is_empty() {
            return None;
        }

        let path_part = if !source_root.is_empty() && href.starts_with(source_root) {
            href[source_root.len()..].trim_start_matches('/').to_string()
        } else if let Some(rest) = href.strip_prefix(legacy_prefix) {
            rest.trim_start_matches('/').to_string()
        } else if href.starts_with('/') {
            warn!(href, section, "absolute href outside the known roots");
            href.trim_start_matches('/').to_string()
        } else {
            format!("{section}/{href}")
        };

        Self::parse(&path_part)
    }

    /// Key of a document file relative to the target root.
    pub fn from_doc_path(path: &Path, root: &Path) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        Self::parse(&path_to_slashes(rel))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key lives below the top-level `section`.
    pub fn is_under(&self, section: &str) -> bool {
        self.0
            .strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_external(href: &str) -> bool {
    href.contains("://")
        || ["mailto:", "tel:", "javascript:", "data:"]
            .iter()
            .any(|scheme| href.starts_with(scheme))
}

/// Space-separated CSS class list as stored in `sidebar_class_name`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ClassTokens(Vec<String>);

impl ClassTokens {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(' ')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Add `token` if absent, leaving the set sorted and deduplicated.
    /// Returns whether the set changed.
    pub fn insert(&mut self, token: &str) -> bool {
        if self.contains(token) {
            return false;
        }
        self.0.push(token.to_string());
        self.0 = self.0.iter().cloned().sorted().dedup().collect();
        true
    }

    /// Remove every occurrence of `token`. Returns whether the set changed.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != token);
        before != self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
