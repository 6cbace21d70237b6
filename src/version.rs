//! Game version probe.
//!
//! Reads the `version` field from the installation's `integrity.json` and
//! trims it to a `major.minor` token. The token is informational only.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::constants::INTEGRITY_FILE;

/// Read the free-form version string from `<install_dir>/integrity.json`.
pub fn check_version(install_dir: &Path) -> Result<String> {
    let path = install_dir.join(INTEGRITY_FILE);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    json.get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no version field in {}", path.display()))
}

/// Trim a version string to its first two dotted components.
///
/// `"0.32.4.0"` becomes `"0.32"`; strings with fewer dots are returned whole.
pub fn major_minor(version: &str) -> &str {
    let Some(first) = version.find('.') else {
        return version;
    };
    match version[first + 1..].find('.') {
        Some(second) => &version[..first + 1 + second],
        None => version,
    }
}
