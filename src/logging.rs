//! Logging configuration for BookRAG

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{
    self,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::LoggingConfig;
use crate::Result;

const LOG_FILE_PREFIX: &str = "bookrag.log";

/// Initialize logging from configuration; `RUST_LOG` wins when set.
///
/// The returned guard flushes the file writer and must be held until shutdown.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));
    init_with_filter(env_filter, &config.level, &config.directory)
}

/// Initialize logging with a forced level (used by `--verbose`)
pub fn init_logging_with_level(config: &LoggingConfig, level: &str) -> Result<WorkerGuard> {
    init_with_filter(EnvFilter::new(filter_directive(level)), level, &config.directory)
}

fn filter_directive(level: &str) -> String {
    format!("{level},bookrag={level},tower_http={level}")
}

fn init_with_filter(env_filter: EnvFilter, level: &str, directory: &str) -> Result<WorkerGuard> {
    let logs_dir = Path::new(directory);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized with level: {level} - console and file output enabled");
    tracing::info!("Log files will be saved to: {directory}/{LOG_FILE_PREFIX}.YYYY-MM-DD");

    Ok(guard)
}
