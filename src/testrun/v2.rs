//! Format revision 2
//!
//! Test targets are listed under `TestConfigurations[].TestTargets`. Only
//! the first test configuration is used.

use serde::Deserialize;
use tracing::debug;

use super::SchemeData;
use crate::common::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct XcTestRunV2 {
    #[serde(default)]
    container_info: ContainerInfo,
    test_configurations: Vec<TestConfiguration>,
    #[serde(default)]
    test_plan: Option<TestPlan>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ContainerInfo {
    container_name: String,
    scheme_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TestConfiguration {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    test_targets: Vec<SchemeData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TestPlan {
    #[serde(default)]
    name: String,
    #[serde(default)]
    is_default: bool,
}

/// Decode a revision 2 document into the targets of its first test
/// configuration, in document order
pub fn decode(content: &[u8]) -> Result<Vec<SchemeData>> {
    let document: XcTestRunV2 = plist::from_bytes(content)
        .map_err(|e| Error::SchemaMismatch(format!("failed to parse format version 2: {e}")))?;

    debug!(
        container = %document.container_info.container_name,
        scheme = %document.container_info.scheme_name,
        test_plan = ?document.test_plan.as_ref().map(|plan| (&plan.name, plan.is_default)),
        configurations = document.test_configurations.len(),
        "decoded xctestrun"
    );

    let mut configurations = document.test_configurations.into_iter();
    let first = configurations
        .next()
        .ok_or_else(|| Error::SchemaMismatch("TestConfigurations is empty".to_string()))?;

    let ignored = configurations.count();
    if ignored > 0 {
        debug!(
            configuration = ?first.name,
            ignored,
            "using first test configuration, ignoring the rest"
        );
    }

    Ok(first.test_targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAKE_APP: &str = include_str!("../../tests/fixtures/fakeapp_v2.xctestrun");

    #[test]
    fn test_targets_in_document_order() {
        let targets = decode(FAKE_APP.as_bytes()).unwrap();
        assert_eq!(targets.len(), 2);

        assert_eq!(targets[0].blueprint_name.as_deref(), Some("FakeApp3Tests"));
        assert_eq!(targets[0].test_host_bundle_identifier, "saucelabs.FakeApp3");
        assert!(!targets[0].is_ui_test_bundle);
        assert!(targets[0].ui_target_app_path.is_none());

        assert_eq!(targets[1].blueprint_name.as_deref(), Some("FakeApp3UITests"));
        assert_eq!(
            targets[1].test_host_bundle_identifier,
            "saucelabs.FakeApp3UITests.xctrunner"
        );
        assert!(targets[1].is_ui_test_bundle);
        assert_eq!(
            targets[1].ui_target_app_path.as_deref(),
            Some("__TESTROOT__/Debug-iphoneos/FakeApp3.app")
        );
        assert!(targets[1].testing_environment_variables.is_empty());
        assert_eq!(
            targets[1]
                .ui_target_app_environment_variables
                .as_ref()
                .map(|env| env.len()),
            Some(1)
        );
    }

    #[test]
    fn test_only_first_configuration_is_used() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>TestConfigurations</key>
    <array>
        <dict>
            <key>TestTargets</key>
            <array>
                <dict><key>BlueprintName</key><string>A</string></dict>
            </array>
        </dict>
        <dict>
            <key>TestTargets</key>
            <array>
                <dict><key>BlueprintName</key><string>B</string></dict>
                <dict><key>BlueprintName</key><string>C</string></dict>
            </array>
        </dict>
    </array>
    <key>__xctestrun_metadata__</key>
    <dict><key>FormatVersion</key><integer>2</integer></dict>
</dict>
</plist>"#;
        let targets = decode(doc.as_bytes()).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].blueprint_name.as_deref(), Some("A"));
    }

    #[test]
    fn test_non_string_env_values_are_kept() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>TestConfigurations</key>
    <array>
        <dict>
            <key>TestTargets</key>
            <array>
                <dict>
                    <key>BlueprintName</key><string>UITests</string>
                    <key>IsUITestBundle</key><true/>
                    <key>EnvironmentVariables</key>
                    <dict><key>N</key><integer>42</integer></dict>
                    <key>UITargetAppEnvironmentVariables</key>
                    <dict><key>B</key><false/></dict>
                </dict>
            </array>
        </dict>
    </array>
    <key>__xctestrun_metadata__</key>
    <dict><key>FormatVersion</key><integer>2</integer></dict>
</dict>
</plist>"#;
        let targets = decode(doc.as_bytes()).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].environment_variables["N"], "42");

        let merged = targets[0].merged_environment();
        assert_eq!(merged.get("N").map(String::as_str), Some("42"));
        assert_eq!(merged.get("B").map(String::as_str), Some("false"));
    }

    #[test]
    fn test_empty_configurations_is_error() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>TestConfigurations</key>
    <array/>
    <key>__xctestrun_metadata__</key>
    <dict><key>FormatVersion</key><integer>2</integer></dict>
</dict>
</plist>"#;
        let err = decode(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }

    #[test]
    fn test_missing_configurations_is_error() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>__xctestrun_metadata__</key>
    <dict><key>FormatVersion</key><integer>2</integer></dict>
</dict>
</plist>"#;
        let err = decode(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }
}
