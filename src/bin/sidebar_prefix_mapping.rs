use libnavmatter::{
    config::PrefixMappingConfig,
    export,
    logging::{LogLevel, init_logging},
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging(LogLevel::Info, None)?;

    let config = PrefixMappingConfig::default();
    let count = export::run(&config)?;
    println!("Mapping of {count} prefixes written to {}", config.output.display());

    Ok(())
}
