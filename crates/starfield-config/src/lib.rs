//! Settings file for the starfield app.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/starfield/` on Linux). A missing file or missing keys fall
//! back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use starfield_core::StarfieldConfig;

/// File name of the settings file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// File name of the log inside the data directory.
pub const LOG_FILE: &str = "starfield.log";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no home directory to place settings in")]
    NoProjectDirs,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames per second.
    pub fps: u32,
    /// Default log filter when `STARFIELD_LOG` is unset.
    pub log_level: String,
    /// Ask the animator to hold still.
    pub reduced_motion: bool,
    /// Look and motion of the starfield.
    pub starfield: StarfieldConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 60,
            log_level: "info".to_string(),
            reduced_motion: false,
            starfield: StarfieldConfig::default(),
        }
    }
}

impl Settings {
    pub const MIN_FPS: u32 = 1;
    pub const MAX_FPS: u32 = 240;

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_path()?)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::io(path, e)),
        };
        let mut settings: Settings = toml::from_str(&text)?;
        settings.fps = settings.fps.clamp(Self::MIN_FPS, Self::MAX_FPS);
        settings.starfield = settings.starfield.validated();
        Ok(settings)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| ConfigError::io(path, e))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "starfield").ok_or(ConfigError::NoProjectDirs)
}

/// Default settings file path.
pub fn default_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Default log file path.
pub fn log_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join(LOG_FILE))
}
