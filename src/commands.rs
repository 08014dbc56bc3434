//! CLI command definitions
//!
//! Defines the clap commands for the xctestrun CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the format version of an xctestrun file
    Version {
        /// Path to the .xctestrun file
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the test targets of an xctestrun file
    #[command(alias = "ls")]
    Parse {
        /// Path to the .xctestrun file
        file: PathBuf,

        /// Only show the test target with this name
        #[arg(long, short)]
        target: Option<String>,

        /// Print the raw target data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the test run configurations for an xctestrun file
    Config {
        /// Path to the .xctestrun file
        file: PathBuf,

        /// Installed apps (JSON or YAML list of CFBundleName/CFBundleIdentifier)
        /// used to resolve the bundle id of UI test target apps
        #[arg(long)]
        apps: Option<PathBuf>,

        /// Device the tests will run on (default: from config file)
        #[arg(long)]
        udid: Option<String>,

        /// Fail if a UI test target app is not among the installed apps
        #[arg(long)]
        strict: bool,

        /// Only build the configuration for the test target with this name
        #[arg(long, short)]
        target: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Whether output (including errors) should be JSON
    pub fn json(&self) -> bool {
        match self {
            Commands::Version { json, .. }
            | Commands::Parse { json, .. }
            | Commands::Config { json, .. } => *json,
        }
    }
}
