/*
[INPUT]:  Log level filter and log directory
[OUTPUT]: Global tracing subscriber (stderr + rolling file), flush guard
[POS]:    Observability layer - process-wide logging setup
[UPDATE]: When changing log destinations, format, or retention
*/

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "bot";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 3;

/// Install the global subscriber.
///
/// Logs go to stderr and to `<log_dir>/bot.<date>.log`, rotated daily with
/// the newest three files kept. Keep the returned guard alive until exit or
/// buffered file lines are lost.
pub fn init_logging(log_level: &str, log_dir: &Path) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .context("create rolling log file")?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;

    Ok(guard)
}
