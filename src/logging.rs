use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_FILE_PREFIX};

/// `RUST_LOG` directives when they parse, the crate default otherwise
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Human-readable events on stderr, JSON lines in a daily file under `log_dir`.
///
/// The returned guard flushes the file writer when dropped, so `main` holds it
/// until exit. Stdout carries only the report.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("log directory {} unavailable ({}), logging to stderr only", log_dir.display(), e);
        let _ = tracing_subscriber::registry()
            .with(build_filter(std::env::var("RUST_LOG").ok().as_deref()))
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
        return None;
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX));

    let installed = tracing_subscriber::registry()
        .with(build_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(fmt::layer().json().with_current_span(true).with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();

    installed.ok().map(|_| guard)
}
