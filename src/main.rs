//! xctestrun - inspect .xctestrun files and build XCTest run configurations

use clap::Parser;
use std::path::PathBuf;
use xctestrun::commands::Commands;
use xctestrun::common::config::Config;
use xctestrun::common::error::ErrorReport;
use xctestrun::common::logging;
use xctestrun::cli;

#[derive(Parser)]
#[command(name = "xctestrun", about = "Parse .xctestrun files into XCTest run configurations")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    let json = cli.command.json();
    let result = Config::load(cli.config.as_deref())
        .and_then(|config| cli::dispatch(cli.command, &config));

    if let Err(e) = result {
        if json {
            let report = ErrorReport::from(&e);
            if let Ok(text) = serde_json::to_string(&report) {
                println!("{text}");
            }
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
