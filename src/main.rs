//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `hopguard` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use hopguard::initialization::init_logger_with;
use hopguard::{run_service, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run_service(config).await {
        eprintln!("hopguard error: {e:#}");
        process::exit(1);
    }
    Ok(())
}
