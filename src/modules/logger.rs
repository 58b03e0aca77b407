//! Tracing setup for the dashboard server.
//!
//! Console output is always on. A daily rolling file under
//! `<data_dir>/logs` is added when the directory is writable; otherwise the
//! server keeps running with console logging only.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppResult;
use crate::models::AppConfig;
use crate::modules::config::get_data_dir;

const LOG_FILE_PREFIX: &str = "uniswap-dashboard.log";

pub fn log_dir() -> AppResult<PathBuf> {
    Ok(get_data_dir()?.join("logs"))
}

/// Non-blocking daily rolling writer in `dir`, created if missing
pub fn file_writer(dir: &Path) -> AppResult<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

/// `RUST_LOG` wins, then the configured level, then `info`
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped, so the caller
/// holds it until shutdown. `None` means console-only logging.
pub fn init_logger(config: &AppConfig) -> Option<WorkerGuard> {
    let file = if config.log_to_file {
        match log_dir().and_then(|dir| file_writer(&dir)) {
            Ok(writer) => Some(writer),
            Err(e) => {
                eprintln!("File logging disabled: {}", e);
                None
            }
        }
    } else {
        None
    };
    let (writer, guard) = match file {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    let file_layer = writer.map(|w| {
        fmt::layer()
            .with_writer(w)
            .with_ansi(false)
            .with_target(true)
    });

    // try_init also bridges `log` records through tracing-log
    let installed = tracing_subscriber::registry()
        .with(env_filter(&config.log_level))
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(file_logging = guard.is_some(), "Logger initialized");
    }
    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_writer_creates_dir_and_flushes_on_drop() {
        let dir = std::env::temp_dir()
            .join(format!("uniswap_dashboard_logs_{}", uuid::Uuid::new_v4().simple()))
            .join("nested");

        let (mut writer, guard) = file_writer(&dir).unwrap();
        writer.write_all(b"relay started\n").unwrap();
        drop(guard);

        let files: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .collect();
        assert_eq!(files.len(), 1);
        let content = std::fs::read_to_string(files[0].path()).unwrap();
        assert!(content.contains("relay started"));
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_file_writer_fails_under_a_file() {
        let blocker = std::env::temp_dir()
            .join(format!("uniswap_dashboard_blocker_{}", uuid::Uuid::new_v4().simple()));
        std::fs::write(&blocker, b"").unwrap();

        assert!(file_writer(&blocker.join("logs")).is_err());
        let _ = std::fs::remove_file(blocker);
    }
}
