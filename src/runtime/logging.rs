use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config;

/// Set up the global subscriber, writing to the log file rather than the
/// terminal the TUI owns. Returns the guard that flushes the writer; drop
/// it only on shutdown.
///
/// Without a resolvable log path (or with an unwritable one) the app simply
/// runs unlogged.
pub fn init(settings: &config::LogSettings) -> Option<WorkerGuard> {
    let path = settings.file.clone().or_else(config::default_log_path)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    // `ANDANTE_LOG` wins over the configured filter.
    let filter = EnvFilter::try_from_env("ANDANTE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);

    Some(guard)
}
