use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "vgate";
const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "vgate.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
}

/// Per-user locations of the settings file and the log file.
///
/// On macOS both resolve to `~/Library/Application Support/vgate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// # Errors
    /// Returns an error when the platform has no config or data directory for
    /// the current user.
    pub fn new() -> Result<Self, AppPathsError> {
        let config_dir = dirs::config_dir().ok_or(AppPathsError::ConfigDirUnavailable)?;
        let data_dir = dirs::data_dir().ok_or(AppPathsError::DataDirUnavailable)?;
        Ok(Self {
            config_dir: config_dir.join(APP_DIR),
            data_dir: data_dir.join(APP_DIR),
        })
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    /// Settings are only ever read, so the log directory is the one that has
    /// to exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}
