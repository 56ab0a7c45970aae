//! Logging setup driven by the run configuration

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use librunbench_core::{BenchmarkConfig, RunbenchError};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber for a run.
///
/// Console output honours `RUST_LOG` when set and falls back to
/// `run.log_level`. When a log file is configured it receives events at
/// `run.log_file_level` and above. With `to_stderr` the console layer writes
/// to stderr so machine-readable stdout stays clean.
///
/// Returns the log file path, if any.
pub fn init(config: &BenchmarkConfig, to_stderr: bool) -> Result<Option<PathBuf>, RunbenchError> {
    let console_filter = EnvFilter::builder()
        .with_default_directive(config.run.log_level.to_level_filter().into())
        .from_env_lossy();
    let console_writer = if to_stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };
    let console_layer = fmt::layer()
        .with_writer(console_writer)
        .with_filter(console_filter);

    let log_file = config.get_log_file()?;
    let file_layer = match &log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| RunbenchError::Filesystem {
                    path: path.clone(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(config.run.log_file_level.to_level_filter()),
            )
        }
        None => None,
    };

    // A second init in the same process keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(log_file)
}
