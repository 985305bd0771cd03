//! Logging initialization: warnings to stderr so stdout stays clean for command output,
//! plus an optional plain-text file.
//!
//! - **RUST_LOG**: filter for both layers. Default: `warn`, or `warn,model_info=debug,cli=debug`
//!   with `--verbose`.
//! - **LOG_FILE** / `--log-file`: when set, events are also appended to this file using
//!   [`ScopedText`](crate::log_format::ScopedText).

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::log_format::ScopedText;

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,model_info=debug,cli=debug";

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    })
}

/// Installs the global subscriber. Keep the returned guard alive until exit so the
/// file writer flushes.
pub fn init(
    verbose: bool,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter(verbose));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let name = path
                .file_name()
                .ok_or_else(|| format!("log file has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = tracing_subscriber::fmt::layer()
                .event_format(ScopedText::new())
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter(verbose));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    if let Some(path) = log_file {
        tracing::debug!(path = %path.display(), "model-info logging to file");
    }
    Ok(guard)
}
