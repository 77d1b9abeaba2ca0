use serde::{Deserialize, Serialize};
use std::path::Path;
use vgate_core::DateMode;
use vgate_platform::AppPaths;

use crate::error::AppError;

/// Version code of this build. Override at compile time with
/// `VGATE_VERSION_CODE`.
pub const CURRENT_VERSION_CODE: &str = match option_env!("VGATE_VERSION_CODE") {
    Some(code) => code,
    None => "060120263",
};

const DEFAULT_MANIFEST_URL: &str = "https://www.lenfi.uk/scr_appversionupdatemanager.json";
const DEFAULT_APP_KEY: &str = "lib_of_dev";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,

    #[serde(default = "default_app_key")]
    pub app_key: String,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub date_mode: DateMode,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_manifest_url() -> String {
    DEFAULT_MANIFEST_URL.to_string()
}

fn default_app_key() -> String {
    DEFAULT_APP_KEY.to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_max_log_size_bytes() -> u64 {
    1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            app_key: default_app_key(),
            http_timeout_secs: default_http_timeout(),
            date_mode: DateMode::default(),
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl AppSettings {
    /// Load settings from `path_override`, or from the per-user settings file.
    ///
    /// A missing per-user file yields defaults; an explicitly named file must
    /// exist.
    pub fn load(path_override: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = path_override {
            return Self::load_from(path);
        }

        let Ok(paths) = AppPaths::new() else {
            return Ok(Self::default());
        };
        let settings_path = paths.settings_file();
        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::SettingsRead {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| AppError::SettingsParse {
            path: path.display().to_string(),
            source,
        })
    }
}
