//! Version gating for client builds.
//!
//! This crate decides whether the running build may keep being used:
//! - Decoding, formatting and ordering of `DDMMYYYYR` version codes.
//! - Classification into up to date, optional update or forced update.
//! - Fetching and decoding the remote version manifest, with every failure
//!   folded into a fail-open error result.
//! - Resolving the store link for the current platform.

mod check;
mod error;
mod manifest;
mod platform;
mod status;
mod version_code;

/// Check entry points, manifest source seam and the per-check result.
pub use check::{
    CheckConfig, HttpManifestSource, ManifestSource, VersionCheckResult, check_app_version,
    check_with_source, evaluate_entry, try_check_with_source,
};
/// Typed check failures and their coarse categories.
pub use error::{CheckError, ErrorKind};
/// Remote manifest model.
pub use manifest::{Manifest, ManifestEntry};
/// Store link resolution.
pub use platform::{Platform, PlatformParseError, resolve_update_url};
/// Update status state machine.
pub use status::{UpdateStatus, classify};
/// Version code codec and comparator.
pub use version_code::{
    CODE_WIDTH, DateMode, ParsedVersion, VersionCode, VersionCodeError, compare_version_codes,
    format_version_code, parse_version_code,
};
