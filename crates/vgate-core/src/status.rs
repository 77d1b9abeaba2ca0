use std::fmt;

use serde::Serialize;

use crate::version_code::ParsedVersion;

/// Outcome of a single version check. Every variant is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    UpToDate,
    OptionalUpdate,
    ForceUpdate,
    /// The check itself was inconclusive. Callers must let the user continue.
    Error,
}

impl UpdateStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpToDate => "up_to_date",
            Self::OptionalUpdate => "optional_update",
            Self::ForceUpdate => "force_update",
            Self::Error => "error",
        }
    }

    /// Only a forced update may block the application; a failed check fails
    /// open.
    #[must_use]
    pub fn blocks_usage(self) -> bool {
        matches!(self, Self::ForceUpdate)
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the update status for the running build.
///
/// Rules are evaluated in order and the first match wins:
/// 1. below the minimum supported version: forced, whatever `force_update` says
/// 2. below the latest version: forced if the server asks for it, else optional
/// 3. otherwise up to date
#[must_use]
pub fn classify(
    current: &ParsedVersion,
    latest: &ParsedVersion,
    min_supported: &ParsedVersion,
    force_update: bool,
) -> UpdateStatus {
    if current < min_supported {
        UpdateStatus::ForceUpdate
    } else if current < latest {
        if force_update {
            UpdateStatus::ForceUpdate
        } else {
            UpdateStatus::OptionalUpdate
        }
    } else {
        UpdateStatus::UpToDate
    }
}
