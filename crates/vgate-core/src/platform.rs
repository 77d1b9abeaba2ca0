use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static PACKAGE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=([^&]+)").expect("package id pattern should compile"));

/// Store channel the update link is resolved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown platform: {0} (expected \"android\" or \"ios\")")]
pub struct PlatformParseError(String);

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

/// Pick the update link for `platform`.
///
/// iOS links are returned untouched. Android store links carrying an `id=`
/// parameter become `market://details?id=<package>` so they open the store
/// app instead of a browser; anything else is returned as given.
#[must_use]
pub fn resolve_update_url(android_url: &str, ios_url: &str, platform: Platform) -> String {
    match platform {
        Platform::Ios => ios_url.to_string(),
        Platform::Android => {
            market_uri(android_url).unwrap_or_else(|| android_url.to_string())
        }
    }
}

fn market_uri(android_url: &str) -> Option<String> {
    let package = PACKAGE_ID.captures(android_url)?.get(1)?.as_str();
    Some(format!("market://details?id={package}"))
}
