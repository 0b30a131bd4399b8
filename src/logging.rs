use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sets up tracing with a human-readable console layer on stderr and a
/// JSON file layer under `logs/`, rotated daily.
///
/// The returned guard owns the background log writer; hold it for the
/// lifetime of the process so buffered lines are flushed on exit.
pub fn init_logging() -> WorkerGuard {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "scrapedash.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Default to info for this crate unless RUST_LOG says otherwise.
    let filter =
        EnvFilter::from_default_env().add_directive("scrapedash_client=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    guard
}
