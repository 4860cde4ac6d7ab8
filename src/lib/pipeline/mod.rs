use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{Section, eyre::eyre};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::{
    catalog::{NavCatalog, build_catalog},
    config::SourceLayout,
    header::{Document, HeaderState, RenderStyle},
    reconcile::reconcile,
    types::DocKey,
    utils::has_extension,
};

/// What happens to reconciled documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteMode {
    InPlace,
    /// Only list the documents that would be processed.
    DryRun,
    /// Write every reconciled document under this directory instead.
    DryRunCopy(PathBuf),
}

#[derive(Clone, Debug)]
pub struct ScrapeOptions {
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    pub single_dir: Option<String>,
    pub mode: WriteMode,
    pub layout: SourceLayout,
}

/// Counters reported at the end of a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub updated: usize,
    pub skipped: usize,
}

pub fn run(options: ScrapeOptions) -> color_eyre::Result<RunSummary> {
    let ctx = RunCtx::load(options)?;

    Pipeline::new(ctx)
        .catalog()?
        .discover()?
        .reconcile()?
        .emit()
}

struct RunCtx {
    source_root: PathBuf,
    target_root: PathBuf,
    scan_root: PathBuf,
    mode: WriteMode,
    layout: SourceLayout,
}

impl RunCtx {
    fn load(options: ScrapeOptions) -> color_eyre::Result<Self> {
        let source_root = std::path::absolute(&options.source_root)
            .with_note(|| "While resolving the source HTML root")?;
        let target_root = std::path::absolute(&options.target_root)
            .with_note(|| "While resolving the target document root")?;

        if !target_root.is_dir() {
            return Err(eyre!(
                "Target root {} is not a directory",
                target_root.display()
            ));
        }

        let scan_root = match &options.single_dir {
            Some(dir) => {
                let path = target_root.join(dir);
                if !path.is_dir() {
                    return Err(eyre!(
                        "Single directory specified but not found: {}",
                        path.display()
                    ));
                }
                info!(dir = %dir, "processing single target directory");
                path
            }
            None => target_root.clone(),
        };

        let mode = match options.mode {
            WriteMode::DryRunCopy(out) => {
                let out = std::path::absolute(&out)
                    .with_note(|| "While resolving the dry-run output directory")?;
                prepare_dry_run_dir(&out, &[source_root.as_path(), target_root.as_path()])?;
                info!(dir = %out.display(), "dry run: writing modified files to output directory");
                WriteMode::DryRunCopy(out)
            }
            other => other,
        };

        info!(source = %source_root.display(), target = %target_root.display(), "roots resolved");

        Ok(Self {
            source_root,
            target_root,
            scan_root,
            mode,
            layout: options.layout,
        })
    }
}

/// Recreate the dry-run output directory. It may not overlap any input root,
/// since it is deleted first.
fn prepare_dry_run_dir(out: &Path, inputs: &[&Path]) -> color_eyre::Result<()> {
    if let Some(root) = inputs
        .iter()
        .find(|root| root.starts_with(out) || out.starts_with(root))
    {
        return Err(eyre!(
            "Dry-run output {} overlaps input directory {}",
            out.display(),
            root.display()
        ));
    }
    if out.exists() {
        fs::remove_dir_all(out).with_note(|| format!("While clearing {}", out.display()))?;
    }
    fs::create_dir_all(out).with_note(|| format!("While creating {}", out.display()))?;
    Ok(())
}

fn discover_documents(ctx: &RunCtx) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for item in WalkDir::new(&ctx.scan_root).sort_by_file_name() {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && has_extension(entry.path(), &ctx.layout.document_extensions)
                {
                    paths.push(entry.into_path());
                }
            }
            Err(e) => warn!(error = %e, "failed to read directory entry"),
        }
    }
    paths
}

/// A reconciled document waiting to be written.
struct Planned {
    path: PathBuf,
    content: String,
    changed: bool,
}

fn reconcile_document(
    ctx: &RunCtx,
    catalog: &NavCatalog,
    path: &Path,
) -> color_eyre::Result<Option<Planned>> {
    info!(path = %path.display(), "processing document");
    let key = DocKey::from_doc_path(path, &ctx.target_root)
        .ok_or_else(|| eyre!("Cannot derive a key for {}", path.display()))?;
    let text = fs::read_to_string(path).with_note(|| format!("While reading {}", path.display()))?;

    let mut doc = Document::parse(&text);
    if doc.state() == HeaderState::Malformed {
        error!(path = %path.display(), "malformed front matter, leaving file untouched");
        return Ok(None);
    }

    let matched = catalog.get(&key);
    if matched.is_none() {
        debug!(key = %key, "no navigation entry, clearing stale sidebar fields");
    }
    let meta = std::mem::take(&mut doc.meta);
    doc.meta = reconcile(meta, matched, &key, &ctx.layout);

    let content = doc.render(RenderStyle::NAVIGATION)?;
    let changed = content != text;
    Ok(Some(Planned {
        path: path.to_path_buf(),
        content,
        changed,
    }))
}

fn emit_document(ctx: &RunCtx, planned: &Planned) -> color_eyre::Result<bool> {
    match &ctx.mode {
        WriteMode::InPlace => {
            if !planned.changed {
                return Ok(false);
            }
            fs::write(&planned.path, &planned.content)
                .with_note(|| format!("While writing {}", planned.path.display()))?;
            Ok(true)
        }
        WriteMode::DryRunCopy(out) => {
            let rel = planned
                .path
                .strip_prefix(&ctx.target_root)
                .map_err(|_| eyre!("{} is outside the target root", planned.path.display()))?;
            let dest = out.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            info!(path = %planned.path.display(), changed = planned.changed, "[DRY RUN] would write");
            fs::write(&dest, &planned.content)
                .with_note(|| format!("While writing {}", dest.display()))?;
            Ok(planned.changed)
        }
        WriteMode::DryRun => Ok(false),
    }
}

trait PipelineStage {}
/// Pipeline typestate driver
struct Pipeline<S: PipelineStage> {
    ctx: RunCtx,
    state: S,
}

impl PipelineStage for () {}
struct Cataloged(NavCatalog);
impl PipelineStage for Cataloged {}
struct Discovered {
    catalog: NavCatalog,
    documents: Vec<PathBuf>,
}
impl PipelineStage for Discovered {}
struct Reconciled {
    planned: Vec<Planned>,
    summary: RunSummary,
}
impl PipelineStage for Reconciled {}

// initial state
impl Pipeline<()> {
    fn new(ctx: RunCtx) -> Self {
        Self { ctx, state: () }
    }

    fn catalog(self) -> color_eyre::Result<Pipeline<Cataloged>> {
        let catalog = build_catalog(&self.ctx.source_root, &self.ctx.layout)
            .with_note(|| "While scraping the legacy navigation")?;
        Ok(Pipeline {
            ctx: self.ctx,
            state: Cataloged(catalog),
        })
    }
}

impl Pipeline<Cataloged> {
    fn discover(self) -> color_eyre::Result<Pipeline<Discovered>> {
        let documents = discover_documents(&self.ctx);
        info!(documents = documents.len(), root = %self.ctx.scan_root.display(), "discovered documents");
        Ok(Pipeline {
            ctx: self.ctx,
            state: Discovered {
                catalog: self.state.0,
                documents,
            },
        })
    }
}

impl Pipeline<Discovered> {
    fn reconcile(self) -> color_eyre::Result<Pipeline<Reconciled>> {
        let mut summary = RunSummary::default();
        let mut planned = Vec::new();

        for path in &self.state.documents {
            if self.ctx.mode == WriteMode::DryRun {
                info!(path = %path.display(), "[DRY RUN] would process");
                summary.processed += 1;
                continue;
            }
            match reconcile_document(&self.ctx, &self.state.catalog, path) {
                Ok(Some(plan)) => {
                    summary.processed += 1;
                    planned.push(plan);
                }
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!(path = %path.display(), error = ?e, "failed to process document");
                    summary.skipped += 1;
                }
            }
        }

        Ok(Pipeline {
            ctx: self.ctx,
            state: Reconciled { planned, summary },
        })
    }
}

impl Pipeline<Reconciled> {
    fn emit(self) -> color_eyre::Result<RunSummary> {
        let mut summary = self.state.summary;
        for planned in &self.state.planned {
            match emit_document(&self.ctx, planned) {
                Ok(true) => summary.updated += 1,
                Ok(false) => {}
                Err(e) => {
                    error!(path = %planned.path.display(), error = ?e, "failed to write document");
                    summary.skipped += 1;
                }
            }
        }

        info!(
            processed = summary.processed,
            updated = summary.updated,
            skipped = summary.skipped,
            "processing complete"
        );
        Ok(summary)
    }
}
