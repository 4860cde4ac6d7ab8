use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{DEFAULT_LOG_FILE, DEFAULT_SOURCE_HTML_ROOT, DEFAULT_TARGET_MDX_ROOT, SourceLayout},
    logging::LogLevel,
    pipeline::{ScrapeOptions, WriteMode},
};

/// Copy sidebar structure from the legacy HTML navigation into document
/// front matter.
#[derive(Debug, Parser)]
#[command(name = "navmatter", version)]
pub struct ScrapeArgs {
    /// Root of the legacy HTML site.
    #[arg(long, default_value = DEFAULT_SOURCE_HTML_ROOT)]
    pub source_html_root: PathBuf,

    /// Root of the documents to update.
    #[arg(long, default_value = DEFAULT_TARGET_MDX_ROOT)]
    pub target_mdx_root: PathBuf,

    /// Only process this subdirectory of the target root.
    #[arg(long)]
    pub single_dir: Option<String>,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Do not modify any document.
    #[arg(long)]
    pub dry_run: bool,

    /// With `--dry-run`, write the would-be documents here instead.
    #[arg(long, value_name = "DIR", requires = "dry_run")]
    pub dry_run_output: Option<PathBuf>,
}

impl ScrapeArgs {
    pub fn into_options(self) -> ScrapeOptions {
        let mode = match (self.dry_run, self.dry_run_output) {
            (false, _) => WriteMode::InPlace,
            (true, None) => WriteMode::DryRun,
            (true, Some(dir)) => WriteMode::DryRunCopy(dir),
        };
        ScrapeOptions {
            source_root: self.source_html_root,
            target_root: self.target_mdx_root,
            single_dir: self.single_dir,
            mode,
            layout: SourceLayout::default(),
        }
    }
}
