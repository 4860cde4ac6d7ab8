use libnavmatter::{
    config::NormalizeConfig,
    logging::{LogLevel, init_logging},
    normalize,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging(LogLevel::Info, None)?;

    let summary = normalize::run(&NormalizeConfig::default())?;
    println!(
        "Processed {} files, updated {}, skipped {}",
        summary.processed, summary.updated, summary.skipped
    );

    Ok(())
}
