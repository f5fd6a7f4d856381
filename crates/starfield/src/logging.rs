//! File logging. The terminal belongs to the UI, so logs go to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter that overrides the settings.
pub const LOG_ENV: &str = "STARFIELD_LOG";

/// Filter from `STARFIELD_LOG`, falling back to `default_level`.
fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install a subscriber appending to the log file. Returns the file path.
pub fn init(default_level: &str) -> color_eyre::Result<PathBuf> {
    let path = starfield_config::log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter(default_level))
        .try_init()
        .map_err(|e| eyre!("installing log subscriber: {e}"))?;

    Ok(path)
}
