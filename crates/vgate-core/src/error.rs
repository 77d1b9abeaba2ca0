use std::fmt;

use thiserror::Error;

use crate::version_code::VersionCodeError;

/// Coarse failure category of a version check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    Data,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Parse => write!(f, "parse"),
            Self::Data => write!(f, "data"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to fetch version manifest: {0}")]
    Request(#[source] reqwest::Error),
    #[error("version manifest request failed with HTTP {status}{body_snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body_snippet: String,
    },
    #[error(
        "failed to parse version manifest: {source}. Version codes with a leading zero must be \
         quoted strings (\"latestCode\": \"080120263\", not 080120263)"
    )]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    #[error("no entry for \"{app_key}\" in version manifest (available keys: {available})")]
    MissingAppKey { app_key: String, available: String },
    #[error("invalid version manifest entry for \"{app_key}\": {source}")]
    InvalidEntry {
        app_key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed {field}: {source}")]
    MalformedCode {
        field: &'static str,
        #[source]
        source: VersionCodeError,
    },
}

impl CheckError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(_) | Self::HttpStatus { .. } => ErrorKind::Network,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::MissingAppKey { .. } | Self::InvalidEntry { .. } => ErrorKind::Data,
            Self::MalformedCode { .. } => ErrorKind::Unknown,
        }
    }

    /// HTTP status of a rejected manifest request, if that is what failed.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(error) => error.status(),
            _ => None,
        }
    }

    pub(crate) fn malformed(field: &'static str, source: VersionCodeError) -> Self {
        Self::MalformedCode { field, source }
    }
}
