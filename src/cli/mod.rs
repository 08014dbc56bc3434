//! CLI command handling
//!
//! Runs the parser for each command and formats its output.

use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::Result;
use crate::testrun::{
    self, FormatVersion, InstalledApp, ResolutionPolicy, SchemeData, TestConfig,
};

/// Device entry handed to the test driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub udid: Option<String>,
}

/// Dispatch a CLI command
pub fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Version { file, json } => {
            let content = testrun::read_file(&file)?;
            let number = testrun::format_version(&content)?;
            let supported = FormatVersion::from_number(number).is_some();

            if json {
                print_json(
                    &serde_json::json!({ "formatVersion": number, "supported": supported }),
                    config,
                )?;
            } else if supported {
                println!("formatVersion {}", number.to_string().green());
            } else {
                println!("formatVersion {} {}", number.to_string().red(), "(unsupported)".dimmed());
            }

            Ok(())
        }

        Commands::Parse { file, target, json } => {
            let schemes = load_schemes(&file, target.as_deref())?;

            if json {
                print_json(&schemes, config)?;
            } else if schemes.is_empty() {
                println!("No test targets found");
            } else {
                for scheme in &schemes {
                    print_scheme(scheme);
                }
            }

            Ok(())
        }

        Commands::Config {
            file,
            apps,
            udid,
            strict,
            target,
            json,
        } => {
            let schemes = load_schemes(&file, target.as_deref())?;
            let inventory = apps.as_deref().map(testrun::load_inventory).transpose()?;
            let policy = if strict {
                ResolutionPolicy::Strict
            } else {
                config.resolution.policy
            };
            let device = Device {
                udid: udid.or_else(|| config.device.udid.clone()),
            };

            let configs = schemes
                .iter()
                .map(|scheme| {
                    scheme.build_test_config(device.clone(), (), inventory.as_deref(), policy)
                })
                .collect::<Result<Vec<_>>>()?;

            if json {
                print_json(&configs, config)?;
            } else if configs.is_empty() {
                println!("No test targets found");
            } else {
                for (scheme, test_config) in schemes.iter().zip(&configs) {
                    print_test_config(scheme, test_config, inventory.as_deref());
                }
            }

            Ok(())
        }
    }
}

fn load_schemes(path: &Path, target: Option<&str>) -> Result<Vec<SchemeData>> {
    let schemes = testrun::parse_file(path)?;
    match target {
        Some(name) => Ok(vec![testrun::select_target(schemes, name)?]),
        None => Ok(schemes),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, config: &Config) -> Result<()> {
    let text = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        println!("  {}: {}", label, "(none)".dimmed());
    } else {
        println!("  {}:", label);
        for item in items {
            println!("    {}", item);
        }
    }
}

fn print_scheme(scheme: &SchemeData) {
    let kind = if scheme.is_ui_test_bundle { "UI tests" } else { "unit tests" };
    println!("{} {}", scheme.display_name().white().bold(), format!("({})", kind).dimmed());
    println!("  Host: {}", scheme.test_host_bundle_identifier);
    println!("  Bundle: {}", scheme.test_bundle_path);
    if let Some(path) = &scheme.ui_target_app_path {
        println!("  Target app: {}", path);
    }
    print_list("Only", &scheme.only_test_identifiers);
    print_list("Skip", &scheme.skip_test_identifiers);
}

fn print_test_config(
    scheme: &SchemeData,
    config: &TestConfig<Device, ()>,
    inventory: Option<&[InstalledApp]>,
) {
    println!("{}", scheme.display_name().white().bold());
    println!("  Runner: {}", config.test_runner_bundle_id);
    println!("  XCTest bundle: {}", config.xctest_config_name);

    if !config.bundle_id.is_empty() {
        println!("  Target app: {}", config.bundle_id.green());
    } else if scheme.is_ui_test_bundle && inventory.is_some() {
        println!("  Target app: {}", "not installed".yellow());
    }

    if let Some(udid) = &config.device.udid {
        println!("  Device: {}", udid);
    }
    println!("  Mode: {}", if config.xc_test { "XCTest" } else { "XCUITest" });

    if !config.args.is_empty() {
        println!("  Args: {}", config.args.join(" "));
    }
    if !config.env.is_empty() {
        println!("  Env:");
        for (key, value) in &config.env {
            println!("    {}={}", key, value.dimmed());
        }
    }
    print_list("Run", &config.tests_to_run);
    print_list("Skip", &config.tests_to_skip);
}
