//! `tracing` subscriber setup shared by the binaries.

use std::{fs::File, path::Path, sync::Mutex};

use clap::ValueEnum;
use color_eyre::Section;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    /// Alias of `error`; tracing has no higher level.
    Critical,
}

impl LogLevel {
    pub const fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

/// Install a stderr logger and, when `log_file` is given, a plain-text copy
/// written to that file. The file is truncated first.
///
/// `NAVMATTER_LOG` takes precedence over `level`. Returns whether the
/// subscriber was installed; once one is set, later calls leave it in place.
pub fn init_logging(level: LogLevel, log_file: Option<&Path>) -> color_eyre::Result<bool> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_note(|| format!("While creating log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(level = level.directive(), log_file = ?log_file, "logging initialized");
    } else {
        tracing::debug!("a global subscriber is already set, keeping it");
    }
    Ok(installed)
}
