//! Logging configuration using the tracing ecosystem.
//!
//! Log output goes to a daily-rotated file under the platform local data
//! directory so normal command output stays clean; `--verbose` adds a
//! stderr layer. Levels are configured through `RUST_LOG`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "atlasctl=info,warn";

/// Initialize the logging system.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the
/// subscriber cannot be installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "atlasctl.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
    });

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(stderr_layer)
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "atlasctl starting");
    tracing::debug!(log_dir = %log_dir.display(), "log directory");

    Ok(())
}

/// Where log files are stored, for display to the user.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine local data directory"))?;

    Ok(base_dir.join("atlasctl").join("logs"))
}

/// Log a clean shutdown before the process exits.
pub fn shutdown() {
    tracing::info!("atlasctl shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_directory_has_expected_structure() {
        let dir = get_log_directory().unwrap();
        assert!(dir.ends_with("atlasctl/logs"));
    }

    #[test]
    fn log_directory_public_accessor() {
        let dir = log_directory();
        assert!(dir.is_some());
    }
}
