use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

/// Initialize file-based logging.
///
/// Logs never go to stdout because the terminal belongs to the UI. `RUST_LOG`
/// takes precedence over `level`. Hold the returned guard until shutdown so
/// buffered entries get flushed. Returns `None` when `path` has no file name.
pub fn init_logging(level: &str, path: &Path) -> Option<WorkerGuard> {
    let file_name = path.file_name()?.to_str()?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let installed = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .try_init();
    if installed.is_err() {
        return None;
    }

    Some(guard)
}
