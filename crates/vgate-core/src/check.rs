use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;

use crate::error::CheckError;
use crate::manifest::{Manifest, ManifestEntry};
use crate::platform::{Platform, resolve_update_url};
use crate::status::{UpdateStatus, classify};
use crate::version_code::{DateMode, ParsedVersion, VersionCode};

const BODY_PREVIEW_CHARS: usize = 200;
const ERROR_SNIPPET_CHARS: usize = 160;

/// Where to look for the manifest and which build is asking.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub manifest_url: String,
    pub app_key: String,
    pub current_code: VersionCode,
    pub date_mode: DateMode,
}

impl CheckConfig {
    #[must_use]
    pub fn new(
        manifest_url: impl Into<String>,
        app_key: impl Into<String>,
        current_code: VersionCode,
    ) -> Self {
        Self {
            manifest_url: manifest_url.into(),
            app_key: app_key.into(),
            current_code,
            date_mode: DateMode::default(),
        }
    }

    #[must_use]
    pub fn with_date_mode(mut self, date_mode: DateMode) -> Self {
        self.date_mode = date_mode;
        self
    }
}

/// Result of one version check. Built fresh per check and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionCheckResult {
    pub status: UpdateStatus,
    pub current_code: u64,
    pub latest_code: u64,
    pub min_supported_code: u64,
    pub force_update: bool,
    pub info: String,
    pub update_url_android: String,
    #[serde(rename = "updateUrliOS")]
    pub update_url_ios: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VersionCheckResult {
    /// The fail-open result: every code collapses to the local one and the
    /// cause is carried in `info` and `error`.
    #[must_use]
    pub fn failed(current_code: &VersionCode, error: &CheckError) -> Self {
        let code = current_code.numeric();
        let message = error.to_string();
        Self {
            status: UpdateStatus::Error,
            current_code: code,
            latest_code: code,
            min_supported_code: code,
            force_update: false,
            info: format!("Version check failed: {message}"),
            update_url_android: String::new(),
            update_url_ios: String::new(),
            error: Some(message),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == UpdateStatus::Error
    }

    #[must_use]
    pub fn update_url(&self, platform: Platform) -> String {
        resolve_update_url(&self.update_url_android, &self.update_url_ios, platform)
    }
}

/// Something that can hand back the raw manifest text.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn location(&self) -> &str;

    async fn fetch_manifest(&self) -> Result<String, CheckError>;
}

/// Fetches the manifest with a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpManifestSource {
    client: reqwest::Client,
    url: String,
}

impl HttpManifestSource {
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch_manifest(&self) -> Result<String, CheckError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(CheckError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, ERROR_SNIPPET_CHARS))
                .unwrap_or_default();
            return Err(CheckError::HttpStatus {
                status,
                body_snippet,
            });
        }

        // Read as text first so a broken payload can be logged verbatim.
        response.text().await.map_err(CheckError::Request)
    }
}

/// Check the running build against the remote manifest over HTTP.
///
/// Never fails: any problem is reported as [`UpdateStatus::Error`].
pub async fn check_app_version(
    client: &reqwest::Client,
    config: &CheckConfig,
) -> VersionCheckResult {
    let source = HttpManifestSource::new(client.clone(), config.manifest_url.clone());
    check_with_source(&source, config).await
}

/// Run the check against any manifest source, folding failures into an
/// [`UpdateStatus::Error`] result.
pub async fn check_with_source<S>(source: &S, config: &CheckConfig) -> VersionCheckResult
where
    S: ManifestSource + ?Sized,
{
    match try_check_with_source(source, config).await {
        Ok(result) => result,
        Err(error) => {
            warn!("Version check failed ({} error): {error}", error.kind());
            VersionCheckResult::failed(&config.current_code, &error)
        }
    }
}

/// Run the check and hand back the typed error instead of folding it.
///
/// # Errors
/// Returns an error when the manifest cannot be fetched, decoded, does not
/// contain the configured application, or carries a malformed version code.
pub async fn try_check_with_source<S>(
    source: &S,
    config: &CheckConfig,
) -> Result<VersionCheckResult, CheckError>
where
    S: ManifestSource + ?Sized,
{
    info!("Checking app version against {}", source.location());

    let body = source.fetch_manifest().await?;
    debug!(
        "Version manifest received (first {BODY_PREVIEW_CHARS} chars): {}",
        body.chars().take(BODY_PREVIEW_CHARS).collect::<String>()
    );

    let entry = Manifest::from_json(&body)?.entry(&config.app_key)?;
    evaluate_entry(config, entry)
}

/// Classify the running build against an already decoded manifest entry.
///
/// # Errors
/// Returns [`CheckError::MalformedCode`] when one of the codes cannot be
/// decoded.
pub fn evaluate_entry(
    config: &CheckConfig,
    entry: ManifestEntry,
) -> Result<VersionCheckResult, CheckError> {
    let latest_code = VersionCode::new(&entry.latest_code)
        .map_err(|source| CheckError::malformed("latestCode", source))?;
    let min_supported_code = VersionCode::new(&entry.min_supported_code)
        .map_err(|source| CheckError::malformed("minSupportedCode", source))?;

    let current = decode(&config.current_code, "currentCode", config.date_mode)?;
    let latest = decode(&latest_code, "latestCode", config.date_mode)?;
    let min_supported = decode(&min_supported_code, "minSupportedCode", config.date_mode)?;

    let status = classify(&current, &latest, &min_supported, entry.force_update);
    debug!(
        "Version comparison: current {}, latest {}, minimum {} -> {status}",
        config.current_code.format(),
        latest_code.format(),
        min_supported_code.format()
    );

    Ok(VersionCheckResult {
        status,
        current_code: current.numeric_code,
        latest_code: latest.numeric_code,
        min_supported_code: min_supported.numeric_code,
        force_update: entry.force_update,
        info: entry.info,
        update_url_android: entry.update_url_android,
        update_url_ios: entry.update_url_ios,
        error: None,
    })
}

fn decode(
    code: &VersionCode,
    field: &'static str,
    mode: DateMode,
) -> Result<ParsedVersion, CheckError> {
    code.parse_with(mode)
        .map_err(|source| CheckError::malformed(field, source))
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}
