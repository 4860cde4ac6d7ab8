use std::{fs, path::Path};

use color_eyre::{Section, eyre::eyre};
use serde_yaml::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    config::NormalizeConfig,
    header::{Document, Field, HeaderState, RenderStyle, SidebarMeta},
    pipeline::RunSummary,
    types::ClassTokens,
    utils::{has_extension, path_to_slashes},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Unchanged,
    /// No usable front matter; the file is left alone.
    Skipped,
}

/// Read `sidebar_level` as an integer, accepting integer-looking strings.
pub fn level_of(meta: &SidebarMeta) -> Option<Result<i64, String>> {
    let raw = meta.get(Field::Level)?;
    let parsed = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Some(parsed.ok_or_else(|| format!("{raw:?}")))
}

/// Apply the level class and directory slug rules to one document's fields.
///
/// `rel_path` is relative to the docs root.
pub fn normalize_meta(mut meta: SidebarMeta, rel_path: &Path, config: &NormalizeConfig) -> SidebarMeta {
    match level_of(&meta) {
        Some(Ok(level)) => {
            if let Some(prefix) = config.level_class_prefixes.get(&level) {
                let class = format!("{prefix}{level}");
                let mut tokens = meta
                    .get(Field::ClassName)
                    .and_then(Value::as_str)
                    .map(ClassTokens::parse)
                    .unwrap_or_default();
                if tokens.insert(&class) {
                    debug!(class = %tokens, "updated sidebar_class_name");
                    meta.set(Field::ClassName, Some(Value::from(tokens.to_string())));
                }
            }
        }
        Some(Err(raw)) => {
            warn!(path = %rel_path.display(), value = %raw, "sidebar_level is not a valid integer");
        }
        None => {}
    }

    if rel_path.starts_with(&config.slug_subdir) {
        if let Some(stem) = rel_path.file_stem() {
            let expected = format!("/{}/{}", config.slug_subdir, stem.to_string_lossy());
            if meta.slug.as_ref().and_then(Value::as_str) != Some(expected.as_str()) {
                debug!(slug = %expected, "updated slug");
                meta.set(Field::Slug, Some(Value::from(expected)));
            }
        }
    }

    meta
}

/// Normalize a single file in place, writing only when its text changes.
pub fn normalize_file(path: &Path, config: &NormalizeConfig) -> color_eyre::Result<Outcome> {
    let text = fs::read_to_string(path).with_note(|| format!("While reading {}", path.display()))?;
    let mut doc = Document::parse(&text);
    if doc.state() != HeaderState::Present {
        warn!(path = %path.display(), "no valid front matter block, skipping");
        return Ok(Outcome::Skipped);
    }

    let rel = path.strip_prefix(&config.docs_root).unwrap_or(path);
    let meta = std::mem::take(&mut doc.meta);
    doc.meta = normalize_meta(meta, rel, config);
    if !doc.is_modified() {
        return Ok(Outcome::Unchanged);
    }

    let rendered = doc.render(RenderStyle::NORMALIZE)?;
    if rendered == text {
        return Ok(Outcome::Unchanged);
    }
    fs::write(path, rendered).with_note(|| format!("While writing {}", path.display()))?;
    info!(path = %path_to_slashes(rel), "updated front matter");
    Ok(Outcome::Updated)
}

/// Normalize every document under the configured docs root.
pub fn run(config: &NormalizeConfig) -> color_eyre::Result<RunSummary> {
    if !config.docs_root.is_dir() {
        return Err(eyre!(
            "Docs path {} not found or is not a directory",
            config.docs_root.display()
        ));
    }
    if !config.docs_root.join(&config.slug_subdir).is_dir() {
        warn!(
            subdir = %config.slug_subdir,
            "slug subdirectory not found under the docs root"
        );
    }

    let mut summary = RunSummary::default();
    for item in WalkDir::new(&config.docs_root).sort_by_file_name() {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "failed to read directory entry");
                summary.skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file()
            || !has_extension(entry.path(), &config.document_extensions)
        {
            continue;
        }

        summary.processed += 1;
        match normalize_file(entry.path(), config) {
            Ok(Outcome::Updated) => summary.updated += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Ok(Outcome::Unchanged) => {}
            Err(e) => {
                warn!(path = %entry.path().display(), error = ?e, "failed to normalize document");
                summary.skipped += 1;
            }
        }
    }

    info!(
        processed = summary.processed,
        updated = summary.updated,
        skipped = summary.skipped,
        "normalization complete"
    );
    Ok(summary)
}
