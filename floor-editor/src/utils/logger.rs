//! Logging Infrastructure
//!
//! Console output always; JSON lines to a daily rolling file when a log
//! directory is configured and exists. `RUST_LOG` overrides the configured
//! level.

use std::path::Path;
use std::sync::Mutex;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logger at `info` on stdout
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// # Arguments
/// * `log_level` - Filter directives (e.g. "debug", "info,floor_editor::merge=debug")
/// * `log_dir` - Directory for `floor-editor.YYYY-MM-DD` files; ignored when missing
///
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level_filter(log_level.unwrap_or("info")));

    let console_layer = fmt::layer().with_target(false);

    let file_layer = existing_dir(log_dir).map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "floor-editor");
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(Mutex::new(appender))
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Parse filter directives, falling back to `info` when they are malformed
pub fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn existing_dir(log_dir: Option<&str>) -> Option<&Path> {
    log_dir.map(Path::new).filter(|p| p.is_dir())
}
