//! Build normalized test configurations from scheme data

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::bundle::{resolve_bundle_id, InstalledApp};
use super::scheme::{EnvMap, SchemeData};
use super::last_path_segment;
use crate::common::{Error, Result};

/// What to do when the UI target app is not in the app inventory
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Log the miss and continue with an empty bundle id
    #[default]
    Lenient,
    /// Fail with [`Error::AppNotFound`]
    Strict,
}

/// Everything a test driver needs to run one test target
///
/// `device` and `listener` are handed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig<D, L> {
    /// Bundle id of the app under test; empty unless resolved
    pub bundle_id: String,
    pub test_runner_bundle_id: String,
    /// File name of the `.xctest` bundle
    pub xctest_config_name: String,
    pub args: Vec<String>,
    pub env: EnvMap,
    pub tests_to_run: Vec<String>,
    pub tests_to_skip: Vec<String>,
    /// True for plain XCTest runs, false for UI tests
    pub xc_test: bool,
    pub device: D,
    #[serde(skip_serializing)]
    pub listener: L,
}

impl SchemeData {
    /// Environment passed to the test run
    ///
    /// UI test bundles get the base variables, then the testing variables,
    /// then the UI target app variables, later ones overriding earlier ones.
    /// Other bundles currently get an empty environment.
    pub fn merged_environment(&self) -> EnvMap {
        let mut env = EnvMap::new();
        if self.is_ui_test_bundle {
            env.extend(self.environment_variables.clone());
            env.extend(self.testing_environment_variables.clone());
            if let Some(ui_env) = &self.ui_target_app_environment_variables {
                env.extend(ui_env.clone());
            }
        }
        env
    }

    /// Build the test configuration for this scheme
    ///
    /// The target app bundle id is only resolved for UI test bundles when
    /// an app inventory is given.
    pub fn build_test_config<D, L>(
        &self,
        device: D,
        listener: L,
        apps: Option<&[InstalledApp]>,
        policy: ResolutionPolicy,
    ) -> Result<TestConfig<D, L>> {
        let bundle_id = match apps {
            Some(apps) if self.is_ui_test_bundle => self.resolve_target_bundle_id(apps, policy)?,
            _ => String::new(),
        };

        let config = TestConfig {
            bundle_id,
            test_runner_bundle_id: self.test_host_bundle_identifier.clone(),
            xctest_config_name: last_path_segment(&self.test_bundle_path).to_string(),
            args: self.command_line_arguments.clone(),
            env: self.merged_environment(),
            tests_to_run: self.only_test_identifiers.clone(),
            tests_to_skip: self.skip_test_identifiers.clone(),
            xc_test: !self.is_ui_test_bundle,
            device,
            listener,
        };

        debug!(
            test_target = %self.display_name(),
            runner = %config.test_runner_bundle_id,
            bundle_id = %config.bundle_id,
            xc_test = config.xc_test,
            "built test config"
        );

        Ok(config)
    }

    fn resolve_target_bundle_id(
        &self,
        apps: &[InstalledApp],
        policy: ResolutionPolicy,
    ) -> Result<String> {
        let path = self.ui_target_app_path.as_deref().unwrap_or_default();
        match resolve_bundle_id(apps, path) {
            Ok(bundle_id) => Ok(bundle_id),
            Err(Error::AppNotFound { name }) if policy == ResolutionPolicy::Lenient => {
                warn!(
                    app = %name,
                    test_target = %self.display_name(),
                    "UI target app is not installed, continuing without bundle id"
                );
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }
}
