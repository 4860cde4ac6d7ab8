//! Export `customProps.sidebar_prefix` values as a TypeScript lookup table
//! the site theme can import.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{Section, eyre::eyre};
use itertools::{Either, Itertools};
use serde_yaml::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{
    config::PrefixMappingConfig,
    header::{Document, HeaderState},
};

const EXPORT_EXTENSION: &str = "mdx";

/// Document id to sidebar prefix, for every document that has one.
pub fn collect_prefixes(docs_root: &Path) -> color_eyre::Result<BTreeMap<String, String>> {
    if !docs_root.is_dir() {
        return Err(eyre!("Docs path {} is not a directory", docs_root.display()));
    }

    let files: Vec<PathBuf> = WalkDir::new(docs_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == EXPORT_EXTENSION))
        .collect();

    let (found, failed): (Vec<_>, Vec<_>) =
        files
            .iter()
            .filter_map(|path| match prefix_of(path) {
                Ok(Some(pair)) => Some(Either::Left(pair)),
                Ok(None) => None,
                Err(e) => Some(Either::Right((path, e))),
            })
            .partition_map(|either| either);

    for (path, e) in &failed {
        warn!(path = %path.display(), error = ?e, "failed to read front matter");
    }
    info!(
        with_prefix = found.len(),
        total = files.len(),
        "collected sidebar prefixes"
    );

    let mut mapping = BTreeMap::new();
    for (id, prefix) in found {
        if let Some(previous) = mapping.insert(id.clone(), prefix) {
            warn!(id = %id, previous = %previous, "duplicate document id, keeping the later prefix");
        }
    }
    Ok(mapping)
}

fn prefix_of(path: &Path) -> color_eyre::Result<Option<(String, String)>> {
    let text = fs::read_to_string(path).with_note(|| format!("While reading {}", path.display()))?;
    let doc = Document::parse(&text);
    if doc.state() == HeaderState::Malformed {
        return Err(eyre!("Malformed front matter"));
    }
    let Some(prefix) = doc.meta.prefix().filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let id = match doc.meta.extra.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    Ok(Some((id, prefix.to_string())))
}

/// TypeScript module text for `mapping`.
pub fn render_mapping_ts(
    mapping: &BTreeMap<String, String>,
    generated_at: &str,
) -> color_eyre::Result<String> {
    let json = serde_json::to_string_pretty(mapping)
        .with_note(|| "While serializing the prefix mapping")?;
    Ok(format!(
        "// Auto-generated mapping of document IDs to sidebar prefixes\n\
         // Generated on {generated_at}\n\
         \n\
         export const sidebarPrefixMapping: Record<string, string> = {json};\n\
         \n\
         export default sidebarPrefixMapping;\n"
    ))
}

/// Collect prefixes under the docs root and write the TypeScript module.
pub fn run(config: &PrefixMappingConfig) -> color_eyre::Result<usize> {
    let mapping = collect_prefixes(&config.docs_root)?;
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .with_note(|| "While formatting the generation timestamp")?;
    let content = render_mapping_ts(&mapping, &generated_at)?;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_note(|| format!("While creating {}", parent.display()))?;
    }
    fs::write(&config.output, content)
        .with_note(|| format!("While writing {}", config.output.display()))?;
    info!(path = %config.output.display(), entries = mapping.len(), "mapping written");
    Ok(mapping.len())
}

#[cfg(test)]
mod tests;
