//! Tracing subscriber setup for the command line tool.
//!
//! Without a log directory everything goes to stdout. With one, lines are
//! written to `fritzbox-lights.<date>.log` files that roll over with the
//! chosen period; the appender deletes the oldest files beyond the limit.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PREFIX: &str = "fritzbox-lights";

/// Parses a `--log-rotation` value.
pub fn parse_rotation(value: &str) -> Result<Rotation, String> {
    match value.to_lowercase().as_str() {
        "minutely" => Ok(Rotation::MINUTELY),
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        other => Err(format!(
            "unknown rotation '{other}', expected minutely, hourly, daily or never"
        )),
    }
}

/// Installs the global subscriber. The returned guard flushes the file
/// writer on drop and must live as long as the program logs.
pub fn init_logging(
    log_dir: Option<&Path>,
    rotation: Rotation,
    max_log_files: usize,
) -> std::io::Result<Option<WorkerGuard>> {
    let Some(log_dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
        return Ok(None);
    };

    let (writer, guard) =
        tracing_appender::non_blocking(file_appender(log_dir, rotation, max_log_files)?);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            Layer::default()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
    Ok(Some(guard))
}

/// `max_log_files` of 0 keeps every file.
fn file_appender(
    log_dir: &Path,
    rotation: Rotation,
    max_log_files: usize,
) -> std::io::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .max_log_files(max_log_files)
        .build(log_dir)
        .map_err(std::io::Error::other)
}
