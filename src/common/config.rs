//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};
use crate::testrun::ResolutionPolicy;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Bundle id resolution settings
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Output formatting settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Target device settings
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Bundle id resolution settings
#[derive(Debug, Deserialize, Default)]
pub struct ResolutionConfig {
    /// What to do when the UI target app is missing from the inventory
    #[serde(default)]
    pub policy: ResolutionPolicy,
}

/// Output formatting settings
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

/// Target device settings
#[derive(Debug, Deserialize, Default)]
pub struct DeviceConfig {
    /// Device used when none is given on the command line
    pub udid: Option<String>,
}

impl Config {
    /// Load configuration from an explicit path, or from the default
    /// config file
    ///
    /// Returns default configuration if the default file doesn't exist.
    /// An explicit path that cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.resolution.policy, ResolutionPolicy::Lenient);
        assert!(config.output.pretty);
        assert!(config.device.udid.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [resolution]
            policy = "strict"

            [output]
            pretty = false

            [device]
            udid = "00008110-000A1B2C3D4E5F6"
            "#,
        )
        .unwrap();
        assert_eq!(config.resolution.policy, ResolutionPolicy::Strict);
        assert!(!config.output.pretty);
        assert_eq!(config.device.udid.as_deref(), Some("00008110-000A1B2C3D4E5F6"));
    }

    #[test]
    fn test_invalid_policy_is_config_error() {
        let err = Config::from_toml("[resolution]\npolicy = \"fuzzy\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/xctestrun.toml"))).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
