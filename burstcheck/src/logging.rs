//! ロギング初期化
//!
//! `BURSTCHECK_LOG_LEVEL`（旧: `RUST_LOG`）でフィルタを指定する。
//! `BURSTCHECK_LOG_DIR` が設定されている場合は日次ローテーションのJSONログも出力する。

use crate::config::get_env_with_fallback;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "burstcheck=info,tower_http=info";

const LOG_FILE_PREFIX: &str = "burstcheck.log";

/// Keeps the file writer flushing until dropped.
///
/// Hold it for the lifetime of `main`.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Build the filter from the environment, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    get_env_with_fallback("BURSTCHECK_LOG_LEVEL", "RUST_LOG")
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// グローバルsubscriberを初期化する
pub fn init() -> anyhow::Result<LoggingGuard> {
    let (file_layer, guard) = match get_env_with_fallback("BURSTCHECK_LOG_DIR", "LOG_DIR") {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;

    Ok(LoggingGuard { _file: guard })
}
