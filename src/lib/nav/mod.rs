use std::{
    fs, io,
    path::{Path, PathBuf},
};

use color_eyre::{Section, eyre::eyre};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, warn};

use crate::{
    config::SourceLayout,
    tree::{self, TreeShape},
    types::DocKey,
    utils::normalize_text,
};

/// One sidebar link scraped from a legacy navigation block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub href: String,
    pub key: DocKey,
    pub label: String,
    /// 1 for rows without indentation markers.
    pub depth: u32,
    /// 1-based, contiguous within the source file.
    pub position: u32,
    pub source: PathBuf,
    pub category: Option<String>,
    pub shape: TreeShape,
}

impl NavEntry {
    pub fn prefix(&self) -> Option<String> {
        tree::render_prefix(self.depth, &self.shape)
    }
}

/// Where a navigation block sits in the key namespace.
#[derive(Clone, Copy, Debug)]
pub struct BlockContext<'a> {
    /// Section key relative hrefs resolve under, e.g. `attributes`.
    pub section: &'a str,
    /// Absolute source root, as hrefs may spell it.
    pub source_root: &'a str,
    pub category: Option<&'a str>,
}

struct Selectors {
    container: Selector,
    link: Selector,
    indent: Selector,
}

impl Selectors {
    fn new(layout: &SourceLayout) -> color_eyre::Result<Self> {
        Ok(Self {
            container: parse_selector(&layout.container_selector)?,
            link: parse_selector("a[href]")?,
            indent: parse_selector(&layout.indent_selector)?,
        })
    }
}

fn parse_selector(raw: &str) -> color_eyre::Result<Selector> {
    Selector::parse(raw).map_err(|e| eyre!("Invalid CSS selector {raw:?}: {e}"))
}

/// Parse every navigation container in `html` into resolved entries.
pub fn parse_nav_block(
    html: &str,
    source: &Path,
    ctx: BlockContext<'_>,
    layout: &SourceLayout,
) -> color_eyre::Result<Vec<NavEntry>> {
    let selectors = Selectors::new(layout)?;
    let document = Html::parse_document(html);
    let mut entries: Vec<NavEntry> = Vec::new();

    for container in document.select(&selectors.container) {
        let rows = container
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| {
                el.value().name() == "div"
                    && el.value().classes().any(|c| c == layout.row_class)
            });

        for row in rows {
            let Some(anchor) = row.select(&selectors.link).next() else {
                continue;
            };
            let href = anchor.value().attr("href").unwrap_or_default().trim();
            let label = normalize_text(&anchor.text().collect::<String>());

            let Some(key) =
                DocKey::from_href(href, ctx.section, ctx.source_root, &layout.legacy_url_prefix)
            else {
                warn!(
                    href,
                    label = %label,
                    source = %source.display(),
                    section = ctx.section,
                    "could not normalize href, skipping entry"
                );
                continue;
            };

            let depth = 1 + row.select(&selectors.indent).count() as u32;
            let position = entries.len() as u32 + 1;
            entries.push(NavEntry {
                href: href.to_string(),
                key,
                label,
                depth,
                position,
                source: source.to_path_buf(),
                category: ctx.category.map(ToOwned::to_owned),
                shape: TreeShape::default(),
            });
        }
    }

    tree::resolve(&mut entries);
    debug!(source = %source.display(), entries = entries.len(), "parsed navigation block");
    Ok(entries)
}

/// Read and parse one legacy HTML file. A missing file yields no entries.
pub fn parse_nav_file(
    path: &Path,
    ctx: BlockContext<'_>,
    layout: &SourceLayout,
) -> color_eyre::Result<Vec<NavEntry>> {
    let html = match fs::read_to_string(path) {
        Ok(html) => html,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!(path = %path.display(), "HTML file not found");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(color_eyre::Report::new(e)
                .with_note(|| format!("While reading {}", path.display())));
        }
    };
    parse_nav_block(&html, path, ctx, layout)
}
