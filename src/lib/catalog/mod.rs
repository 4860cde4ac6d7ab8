use std::{collections::HashMap, path::Path};

use color_eyre::{Section, eyre::eyre};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    config::SourceLayout,
    nav::{BlockContext, NavEntry, parse_nav_file},
    types::DocKey,
};

/// Lookup table from document key to the navigation entry that describes it.
#[derive(Debug, Default)]
pub struct NavCatalog {
    entries: HashMap<DocKey, NavEntry>,
}

impl NavCatalog {
    /// Insert an entry. On key collisions the later entry wins.
    pub fn insert(&mut self, entry: NavEntry) {
        if let Some(previous) = self.entries.get(&entry.key) {
            warn!(
                key = %entry.key,
                previous = %previous.source.display(),
                source = %entry.source.display(),
                "duplicate navigation key, overwriting"
            );
        }
        self.entries.insert(entry.key.clone(), entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = NavEntry>) {
        for entry in entries {
            self.insert(entry);
        }
    }

    pub fn get(&self, key: &DocKey) -> Option<&NavEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scrape every section directory under `source_root`.
///
/// * the relationships directory contributes one block per category file,
/// * the SES directory contributes its SES index under the SES section key,
///   plus its own `index.html` for keys outside that section,
/// * every other directory contributes its `index.html`.
pub fn build_catalog(source_root: &Path, layout: &SourceLayout) -> color_eyre::Result<NavCatalog> {
    let root_str = source_root.to_string_lossy();
    let mut catalog = NavCatalog::default();

    let sections = WalkDir::new(source_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .with_note(|| format!("While listing {}", source_root.display()))?;

    for section in sections.into_iter().filter(|e| e.file_type().is_dir()) {
        let name = section.file_name().to_string_lossy().into_owned();
        let dir = section.path();

        if name == layout.relationships_dir {
            for file_base in &layout.relationship_category_files {
                let path = dir.join(format!("{file_base}.html"));
                if !path.exists() {
                    debug!(path = %path.display(), "relationship category file not found");
                    continue;
                }
                info!(path = %path.display(), category = %file_base, "parsing relationships HTML");
                let category = layout.relationship_category(file_base);
                let ctx = BlockContext {
                    section: &layout.relationships_dir,
                    source_root: &root_str,
                    category: category.as_deref(),
                };
                catalog.extend(parse_nav_file(&path, ctx, layout)?);
            }
        } else if name == layout.ses_source_dir {
            let ses_path = dir.join(&layout.ses_index_filename);
            if ses_path.exists() {
                info!(path = %ses_path.display(), "parsing SES HTML");
                let ctx = BlockContext {
                    section: &layout.ses_section_key,
                    source_root: &root_str,
                    category: None,
                };
                catalog.extend(parse_nav_file(&ses_path, ctx, layout)?);
            }

            let index_path = dir.join("index.html");
            if index_path.exists() && layout.ses_index_filename != "index.html" {
                info!(path = %index_path.display(), "parsing VES HTML");
                let ctx = BlockContext {
                    section: &name,
                    source_root: &root_str,
                    category: None,
                };
                let entries = parse_nav_file(&index_path, ctx, layout)?;
                catalog.extend(
                    entries
                        .into_iter()
                        .filter(|e| !e.key.is_under(&layout.ses_section_key)),
                );
            }
        } else {
            let path = dir.join("index.html");
            if !path.exists() {
                debug!(dir = %dir.display(), "no index.html to parse");
                continue;
            }
            info!(path = %path.display(), section = %name, "parsing section HTML");
            let ctx = BlockContext {
                section: &name,
                source_root: &root_str,
                category: None,
            };
            catalog.extend(parse_nav_file(&path, ctx, layout)?);
        }
    }

    info!(entries = catalog.len(), "cached navigation entries");
    if catalog.is_empty() {
        return Err(eyre!(
            "No navigation entries could be scraped from {}",
            source_root.display()
        ));
    }
    Ok(catalog)
}
