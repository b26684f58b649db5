use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;

const LOG_PREFIX: &str = "timegrid";
const MAX_LOG_FILES: usize = 5;

pub fn log_dir() -> Result<PathBuf> {
    Ok(dirs::data_local_dir()
        .context("Cannot determine data directory")?
        .join("timegrid")
        .join("logs"))
}

/// Log to a daily rolling file; the terminal belongs to the UI.
///
/// `RUST_LOG` wins over `level` when set. Keep the returned guard alive until
/// exit so buffered lines are flushed.
pub fn enable_logging(dir: &Path, level: &str) -> Result<WorkerGuard> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_PREFIX)
        .build(dir)
        .with_context(|| format!("Failed to open log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("timegrid={level},sheets={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
