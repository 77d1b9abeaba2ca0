use thiserror::Error;
use vgate_core::VersionCodeError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read settings from {path}: {source}")]
    SettingsRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid version code: {0}")]
    VersionCode(#[from] VersionCodeError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("failed to render JSON output: {0}")]
    Render(#[source] serde_json::Error),
}
