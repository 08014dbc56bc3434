//! Per-target test configuration as found in an xctestrun file
//!
//! Both format revisions describe a test target with the same keys, so a
//! single type serves both decoders.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Environment variable name to value
pub type EnvMap = BTreeMap<String, String>;

/// One test target's run configuration
///
/// Keys missing from the document decode to their empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SchemeData {
    /// Name of the test target (e.g. "RunnerTests")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blueprint_name: Option<String>,
    /// Bundle id of the app hosting the test bundle
    pub test_host_bundle_identifier: String,
    /// Path of the `.xctest` bundle, usually relative to `__TESTHOST__`
    pub test_bundle_path: String,
    /// Tests to skip, in document order
    pub skip_test_identifiers: Vec<String>,
    /// Tests to run, in document order; empty means all
    pub only_test_identifiers: Vec<String>,
    /// Whether the bundle is a UI test bundle driven by a runner app
    #[serde(rename = "IsUITestBundle", deserialize_with = "deserialize_flag")]
    pub is_ui_test_bundle: bool,
    pub command_line_arguments: Vec<String>,
    #[serde(deserialize_with = "deserialize_env")]
    pub environment_variables: EnvMap,
    #[serde(deserialize_with = "deserialize_env")]
    pub testing_environment_variables: EnvMap,
    #[serde(
        rename = "UITargetAppEnvironmentVariables",
        deserialize_with = "deserialize_optional_env",
        skip_serializing_if = "Option::is_none"
    )]
    pub ui_target_app_environment_variables: Option<EnvMap>,
    /// Path of the app under test for UI test bundles
    #[serde(rename = "UITargetAppPath", skip_serializing_if = "Option::is_none")]
    pub ui_target_app_path: Option<String>,
}

impl SchemeData {
    /// Target name for display, falling back to the test bundle name
    pub fn display_name(&self) -> &str {
        match &self.blueprint_name {
            Some(name) => name,
            None => super::last_path_segment(&self.test_bundle_path),
        }
    }
}

/// An environment value; plist scalars other than strings are rendered to
/// their literal text (`<integer>1</integer>` becomes `1`, `<true/>` becomes
/// `true`)
struct EnvValue(String);

impl<'de> Deserialize<'de> for EnvValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EnvValueVisitor;

        impl<'de> Visitor<'de> for EnvValueVisitor {
            type Value = EnvValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<EnvValue, E> {
                Ok(EnvValue(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<EnvValue, E> {
                Ok(EnvValue(v.to_string()))
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<EnvValue, E> {
                Ok(EnvValue(String::from_utf8_lossy(v).into_owned()))
            }
        }

        deserializer.deserialize_any(EnvValueVisitor)
    }
}

fn deserialize_env<'de, D>(deserializer: D) -> std::result::Result<EnvMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, EnvValue>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(key, EnvValue(value))| (key, value)).collect())
}

fn deserialize_optional_env<'de, D>(deserializer: D) -> std::result::Result<Option<EnvMap>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_env(deserializer).map(Some)
}

/// Accept both `<true/>`/`<false/>` and integer flags
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or an integer")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<bool, E> {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_xml(body: &str) -> SchemeData {
        let doc = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict>{body}</dict></plist>"#
        );
        plist::from_bytes(doc.as_bytes()).unwrap()
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let data = from_xml("");
        assert_eq!(data, SchemeData::default());
        assert!(data.only_test_identifiers.is_empty());
        assert!(data.ui_target_app_path.is_none());
        assert!(!data.is_ui_test_bundle);
    }

    #[test]
    fn test_flag_accepts_integer() {
        let data = from_xml("<key>IsUITestBundle</key><integer>1</integer>");
        assert!(data.is_ui_test_bundle);

        let data = from_xml("<key>IsUITestBundle</key><integer>0</integer>");
        assert!(!data.is_ui_test_bundle);
    }

    #[test]
    fn test_flag_accepts_boolean() {
        let data = from_xml("<key>IsUITestBundle</key><true/>");
        assert!(data.is_ui_test_bundle);
    }

    #[test]
    fn test_flag_rejects_string() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict><key>IsUITestBundle</key><string>yes</string></dict></plist>"#;
        assert!(plist::from_bytes::<SchemeData>(doc.as_bytes()).is_err());
    }

    #[test]
    fn test_env_values_rendered_as_text() {
        let data = from_xml(
            r#"<key>EnvironmentVariables</key>
            <dict>
                <key>S</key><string>text</string>
                <key>N</key><integer>1</integer>
                <key>R</key><real>1.5</real>
                <key>B</key><true/>
            </dict>
            <key>UITargetAppEnvironmentVariables</key>
            <dict><key>F</key><false/></dict>"#,
        );
        assert_eq!(data.environment_variables["S"], "text");
        assert_eq!(data.environment_variables["N"], "1");
        assert_eq!(data.environment_variables["R"], "1.5");
        assert_eq!(data.environment_variables["B"], "true");
        assert_eq!(
            data.ui_target_app_environment_variables
                .as_ref()
                .map(|env| env["F"].as_str()),
            Some("false")
        );
        assert!(data.testing_environment_variables.is_empty());
    }

    #[test]
    fn test_display_name() {
        let mut data = from_xml(
            "<key>TestBundlePath</key><string>__TESTHOST__/PlugIns/RunnerTests.xctest</string>",
        );
        assert_eq!(data.display_name(), "RunnerTests.xctest");

        data.blueprint_name = Some("RunnerTests".to_string());
        assert_eq!(data.display_name(), "RunnerTests");
    }
}
