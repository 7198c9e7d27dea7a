use std::fs;
use std::sync::Mutex;

use crate::config::LogConfig;

/// Install the global tracing subscriber. The terminal belongs to the game, so
/// events go to the configured log file; with no file nothing is installed.
pub fn init(config: &LogConfig) -> std::io::Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let level = config
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let log_file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(level)
        .init();

    tracing::info!(path = %path.display(), %level, "logging started");
    Ok(())
}
