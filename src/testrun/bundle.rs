//! Bundle id resolution for UI test target apps
//!
//! The xctestrun file only names the app under test by its path, so the
//! bundle id is recovered from the list of apps installed on the device.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::last_path_segment;
use crate::common::{Error, Result};

/// Suffix of application bundle directories
pub const APP_SUFFIX: &str = ".app";

/// An app installed on the device, as reported by the installation proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
    #[serde(rename = "CFBundleName", alias = "displayName", alias = "display_name")]
    pub display_name: String,
    #[serde(
        rename = "CFBundleIdentifier",
        alias = "bundleIdentifier",
        alias = "bundle_identifier"
    )]
    pub bundle_identifier: String,
}

/// Find the bundle id of the app at `ui_target_app_path`
///
/// Matches the app directory name, without `.app`, against the display
/// names exactly. The first match wins.
pub fn resolve_bundle_id(apps: &[InstalledApp], ui_target_app_path: &str) -> Result<String> {
    let app_name = last_path_segment(ui_target_app_path);
    let app_name = app_name.strip_suffix(APP_SUFFIX).unwrap_or(app_name);

    apps.iter()
        .find(|app| app.display_name == app_name)
        .map(|app| app.bundle_identifier.clone())
        .ok_or_else(|| Error::AppNotFound {
            name: app_name.to_string(),
        })
}

/// Load an app inventory from a JSON or YAML file
///
/// Files ending in `.yaml` or `.yml` are read as YAML, anything else as
/// JSON.
pub fn load_inventory(path: &Path) -> Result<Vec<InstalledApp>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| Error::Inventory(e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| Error::Inventory(e.to_string()))
    }
}
