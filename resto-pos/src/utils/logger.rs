//! Logging Infrastructure
//!
//! Structured logging setup for development and production terminals.
//! File output rotates daily as `resto-pos.YYYY-MM-DD.log` under the log
//! directory; [`cleanup_old_logs`] prunes old files.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

const LOG_PREFIX: &str = "resto-pos";
const LOG_SUFFIX: &str = "log";

/// Initialize console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Initialize the logging system with optional daily rotating file output
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging (e.g., Some(Path::new("./work_dir/logs")))
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let app_log = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_PREFIX)
                .filename_suffix(LOG_SUFFIX)
                .build(dir)?;

            let file_layer = if json_format {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed()
            } else {
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed()
            };

            subscriber.with(console_layer).with(file_layer).try_init()?;
        }
        None => subscriber.with(console_layer).try_init()?,
    }

    Ok(())
}

/// Delete rotated log files older than `days`
///
/// Returns the number of files removed. Files not matching the rotation
/// pattern are left alone.
pub fn cleanup_old_logs(log_dir: &Path, days: i64) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(days);
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        // resto-pos.YYYY-MM-DD.log
        if let Some(date_part) = name
            .strip_prefix(LOG_PREFIX)
            .and_then(|d| d.strip_prefix('.'))
            .and_then(|d| d.strip_suffix(LOG_SUFFIX))
            .and_then(|d| d.strip_suffix('.'))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}
