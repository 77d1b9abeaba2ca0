use log::warn;
use serde::{Deserialize, Deserializer};

use crate::error::CheckError;

/// The decoded top-level manifest object, keyed by application identifier.
///
/// Entries stay untyped until one is requested, so a broken entry for some
/// other application never fails a check.
#[derive(Debug, Clone)]
pub struct Manifest {
    entries: serde_json::Map<String, serde_json::Value>,
}

/// Version policy declared for one application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    #[serde(deserialize_with = "code_text")]
    pub latest_code: String,
    #[serde(deserialize_with = "code_text")]
    pub min_supported_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub force_update: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub update_url_android: String,
    #[serde(default, rename = "updateUrliOS", deserialize_with = "null_as_default")]
    pub update_url_ios: String,
}

impl Manifest {
    /// Decode a manifest body.
    ///
    /// # Errors
    /// Returns [`CheckError::Parse`] when the text is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self, CheckError> {
        serde_json::from_str(text)
            .map(|entries| Self { entries })
            .map_err(|source| CheckError::Parse { source })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Look up and decode the entry for `app_key`.
    ///
    /// # Errors
    /// Returns [`CheckError::MissingAppKey`] listing the keys that are present
    /// when `app_key` is absent, or [`CheckError::InvalidEntry`] when the entry
    /// lacks required fields.
    pub fn entry(&self, app_key: &str) -> Result<ManifestEntry, CheckError> {
        let Some(value) = self.entries.get(app_key) else {
            return Err(CheckError::MissingAppKey {
                app_key: app_key.to_string(),
                available: self.available_keys(),
            });
        };

        ManifestEntry::deserialize(value).map_err(|source| CheckError::InvalidEntry {
            app_key: app_key.to_string(),
            source,
        })
    }

    fn available_keys(&self) -> String {
        if self.entries.is_empty() {
            "none".to_string()
        } else {
            self.keys().collect::<Vec<_>>().join(", ")
        }
    }
}

// Codes belong in strings, but a number without a leading zero still carries
// every digit, so it is accepted and padded later.
fn code_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCode {
        Text(String),
        Number(u64),
    }

    Ok(match RawCode::deserialize(deserializer)? {
        RawCode::Text(text) => text,
        RawCode::Number(number) => {
            warn!("Version code {number} was sent as a JSON number; send it as a quoted string");
            number.to_string()
        }
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{Manifest, ManifestEntry};
    use crate::error::CheckError;

    const FULL: &str = r#"{
        "lib_of_dev": {
            "latestCode": "080120263",
            "minSupportedCode": "060120261",
            "forceUpdate": true,
            "info": "Bug fixes",
            "updateUrlAndroid": "https://play.google.com/store/apps/details?id=com.example.app",
            "updateUrliOS": "https://apps.apple.com/app/id1"
        },
        "other_app": { "latestCode": "010120250" }
    }"#;

    #[test]
    fn decodes_the_requested_entry() {
        let entry = Manifest::from_json(FULL)
            .expect("manifest should decode")
            .entry("lib_of_dev")
            .expect("entry should decode");

        assert_eq!(
            entry,
            ManifestEntry {
                latest_code: "080120263".to_string(),
                min_supported_code: "060120261".to_string(),
                force_update: true,
                info: "Bug fixes".to_string(),
                update_url_android:
                    "https://play.google.com/store/apps/details?id=com.example.app".to_string(),
                update_url_ios: "https://apps.apple.com/app/id1".to_string(),
            }
        );
    }

    #[test]
    fn broken_entries_for_other_apps_are_ignored() {
        let manifest = Manifest::from_json(FULL).expect("manifest should decode");
        assert!(manifest.entry("lib_of_dev").is_ok());
        assert!(matches!(
            manifest.entry("other_app"),
            Err(CheckError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let manifest = Manifest::from_json(
            r#"{"app": {"latestCode": "080120263", "minSupportedCode": "010120260", "info": null}}"#,
        )
        .expect("manifest should decode");
        let entry = manifest.entry("app").expect("entry should decode");

        assert!(!entry.force_update);
        assert_eq!(entry.info, "");
        assert_eq!(entry.update_url_android, "");
        assert_eq!(entry.update_url_ios, "");
    }

    #[test]
    fn numeric_codes_are_accepted() {
        let manifest = Manifest::from_json(
            r#"{"app": {"latestCode": 80120263, "minSupportedCode": 110120260}}"#,
        )
        .expect("manifest should decode");
        let entry = manifest.entry("app").expect("entry should decode");

        assert_eq!(entry.latest_code, "80120263");
        assert_eq!(entry.min_supported_code, "110120260");
    }

    #[test]
    fn leading_zero_numbers_are_a_parse_error() {
        let error = Manifest::from_json(r#"{"app": {"latestCode": 080120263}}"#)
            .expect_err("leading zero number should not parse");
        assert!(matches!(error, CheckError::Parse { .. }));
    }

    #[test]
    fn non_object_body_is_a_parse_error() {
        assert!(matches!(
            Manifest::from_json("[1, 2, 3]"),
            Err(CheckError::Parse { .. })
        ));
        assert!(matches!(
            Manifest::from_json("<html>maintenance</html>"),
            Err(CheckError::Parse { .. })
        ));
    }

    #[test]
    fn missing_key_reports_present_keys() {
        let manifest = Manifest::from_json(FULL).expect("manifest should decode");
        let error = manifest
            .entry("unknown")
            .expect_err("unknown key should be reported");

        match error {
            CheckError::MissingAppKey { app_key, available } => {
                assert_eq!(app_key, "unknown");
                assert_eq!(available, "lib_of_dev, other_app");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_key_in_empty_manifest_says_none() {
        let error = Manifest::from_json("{}")
            .expect("empty object should decode")
            .entry("app")
            .expect_err("empty manifest has no entries");
        assert!(error.to_string().contains("available keys: none"));
    }

    #[test]
    fn entry_without_required_codes_is_invalid() {
        let manifest = Manifest::from_json(r#"{"app": {"forceUpdate": true}}"#)
            .expect("manifest should decode");
        assert!(matches!(
            manifest.entry("app"),
            Err(CheckError::InvalidEntry { .. })
        ));
    }
}
