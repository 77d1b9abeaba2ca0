use std::cmp::Ordering;

use vgate_core::{Platform, UpdateStatus, VersionCheckResult, VersionCode};

use crate::error::AppError;

/// Process exit status for a check. Only a forced update is non-zero, so a
/// failed check never stops a wrapper script.
pub fn exit_status(status: UpdateStatus) -> u8 {
    if status.blocks_usage() { 2 } else { 0 }
}

pub fn ordering_value(ordering: Ordering) -> i8 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

pub fn render_json(result: &VersionCheckResult) -> Result<String, AppError> {
    serde_json::to_string_pretty(result).map_err(AppError::Render)
}

pub fn render_summary(result: &VersionCheckResult, platform: Platform) -> String {
    let mut lines = vec![
        format!("Status:            {}", status_label(result.status)),
        format!("Current version:   {}", display_code(result.current_code)),
    ];

    if !result.is_error() {
        lines.push(format!(
            "Latest version:    {}",
            display_code(result.latest_code)
        ));
        lines.push(format!(
            "Minimum supported: {}",
            display_code(result.min_supported_code)
        ));
    }

    if !result.info.is_empty() {
        lines.push(format!("Info:              {}", result.info));
    }

    if matches!(
        result.status,
        UpdateStatus::OptionalUpdate | UpdateStatus::ForceUpdate
    ) {
        let url = result.update_url(platform);
        if !url.is_empty() {
            lines.push(format!("Update link:       {url}"));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn status_label(status: UpdateStatus) -> &'static str {
    match status {
        UpdateStatus::UpToDate => "up to date",
        UpdateStatus::OptionalUpdate => "update available",
        UpdateStatus::ForceUpdate => "update required",
        UpdateStatus::Error => "check failed, continuing",
    }
}

fn display_code(code: u64) -> String {
    VersionCode::from_number(code).map_or_else(|_| code.to_string(), |code| code.format())
}
