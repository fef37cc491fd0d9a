//! Logging setup
//!
//! Human readable output on stderr, or a daily rolling file when a log
//! directory is given. `RUST_LOG` wins over `--log-level`.

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "warn";

/// Initialize the logger with optional file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or(DEFAULT_LEVEL)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if std::fs::create_dir_all(dir).is_ok() {
            let file_appender = tracing_appender::rolling::daily(dir, "booking");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("Cannot create log directory {}, logging to stderr", dir.display());
    }

    subscriber.with_writer(std::io::stderr).init();
}
