// Main entry point for testtool-report

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use testtool_sdk::cli::{Cli, Commands};
use testtool_sdk::commands::{handle_decode, handle_junit};
use testtool_sdk::config::{self, Config};
use testtool_sdk::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting testtool-report v{}", env!("CARGO_PKG_VERSION"));
    }

    // Handle init_config flag
    if let Some(config_file) = cli.init_config {
        let toml_content = Config::default().to_toml();
        std::fs::write(&config_file, toml_content).with_context(|| {
            format!("Failed to write configuration: {}", config_file.display())
        })?;
        println!("Configuration file created: {}", config_file.display());
        return Ok(());
    }

    let config = Config::resolve();

    // Handle config flag
    if cli.config {
        println!("Current configuration:");
        println!("  Pipe fd: {}", config.pipe.fd);
        println!("  Lock path: {}", config.pipe.lock_path.display());
        println!("  Lock mode: {:?}", config.pipe.lock_mode);
        match &config.file.report_path {
            Some(path) => println!("  File report path: {}", path.display()),
            None => println!("  File report path: not set (pipe mode)"),
        }

        println!("\nConfiguration precedence:");
        println!("  1. Command-line arguments (highest)");
        println!(
            "  2. Environment variables ({}, {})",
            config::ENV_REPORTER_LOCK,
            config::ENV_FILE_REPORT_PATH
        );
        println!("  3. Configuration file ({})", config::CONFIG_FILE_NAME);
        println!("  4. Built-in defaults (lowest)");
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Junit(args)) => handle_junit(args, &config),
        Some(Commands::Decode(args)) => handle_decode(args),
        None => {
            warn!("No command provided. Use 'testtool-report --help' for usage.");
            Ok(())
        }
    }
}
