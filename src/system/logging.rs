//! Logging system initialization
//!
//! Sets up `tracing` according to the `[logging]` section of the static
//! configuration: console or file output, optional daily rotation, text or
//! JSON formatting.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

type BoxedWriter = Box<dyn std::io::Write + Send + Sync>;

/// Initialize logging system based on configuration
///
/// **Note**: call once during startup, after the configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - must be kept alive for the duration of the program so
///   that buffered log lines are flushed
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let to_file = config.file.as_deref().is_some_and(|f| !f.is_empty());
    let writer = make_writer(config);

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.clone()));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(!to_file);

    // try_init：测试或重复初始化时不 panic
    let result = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("[WARN] Logging already initialized: {}", e);
    }

    guard
}

fn make_writer(config: &LoggingConfig) -> BoxedWriter {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.is_empty()) else {
        return Box::new(std::io::stdout());
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path.parent().unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("qrlinker.log");

        match rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups as usize)
            .build(dir)
        {
            Ok(appender) => Box::new(appender),
            Err(e) => {
                eprintln!(
                    "[ERROR] Failed to create rolling log appender: {}, falling back to stdout",
                    e
                );
                Box::new(std::io::stdout())
            }
        }
    } else {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
        {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!(
                    "[ERROR] Failed to open log file {}: {}, falling back to stdout",
                    log_file, e
                );
                Box::new(std::io::stdout())
            }
        }
    }
}
