use clap::Parser;
use libnavmatter::{cli::ScrapeArgs, logging::init_logging, pipeline};
use tracing::info;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = ScrapeArgs::parse();
    init_logging(args.log_level, Some(args.log_file.as_path()))?;

    let summary = pipeline::run(args.into_options())?;
    info!(
        processed = summary.processed,
        updated = summary.updated,
        skipped = summary.skipped,
        "sidebar front matter generation finished"
    );

    Ok(())
}
