use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file path.
pub const LOG_FILE_ENV: &str = "STAYKIT_LOG";

/// Initialize tracing.
///
/// Filtering follows `RUST_LOG` (default `info`). Output goes to stderr
/// unless `STAYKIT_LOG` names a file path, in which case it goes to
/// `{path}.{timestamp}.{pid}` so concurrent runs never share a file. If
/// that file cannot be created, output falls back to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(file) = std::env::var(LOG_FILE_ENV).ok().and_then(|path| open_log_file(&path)) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true),
            )
            .init();
        return;
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339()),
        )
        .init();
}

fn unique_log_path(log_path: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", log_path, timestamp, pid)
}

fn open_log_file(log_path: &str) -> Option<std::fs::File> {
    let unique_path = unique_log_path(log_path);
    match std::fs::File::create(&unique_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Failed to create log file {}: {}; logging to stderr", unique_path, e);
            None
        }
    }
}
