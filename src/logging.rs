//! File-based logging for the TV shell
//!
//! The TUI owns the terminal, so logs go to a daily-rotated file
//! under `.logs/` instead of stdout. Filtering follows `RUST_LOG`
//! when set.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "spotify-tv";

/// Initialize logging into `.logs/spotify-tv.YYYY-MM-DD.log`.
///
/// Returns the writer guard; dropping it stops the background writer,
/// so the caller keeps it alive for the whole run.
pub fn init_logging() -> Result<WorkerGuard> {
    std::fs::create_dir_all(LOG_DIR)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    // Non-blocking writer so logging never stalls the event loop
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("spotify_tv=debug,rspotify=info,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // log files stay plain text
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(guard)
}
