//! lambda-cron
//!
//! Dry-run tool for serverless schedule translation.
//!
//! # Usage
//!
//! ```bash
//! lambda-cron package serverless.yml [--stage STAGE] [--output PATH]
//! lambda-cron validate serverless.yml [--stage STAGE]
//! lambda-cron translate '{"type":"daily","params":{"hour":2}}' [--year YEAR]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/lambda-cron/config.toml)
//! 3. Environment variables (LAMBDA_CRON_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use lambda_cron_cli::{run_package, run_translate, run_validate, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Package {
            service,
            stage,
            output,
        } => {
            run_package(
                cli.config.as_deref(),
                cli.log_level.as_deref(),
                &service,
                stage.as_deref(),
                output.as_deref(),
            )?;
        }
        Commands::Validate { service, stage } => {
            run_validate(
                cli.config.as_deref(),
                cli.log_level.as_deref(),
                &service,
                stage.as_deref(),
            )?;
        }
        Commands::Translate { descriptor, year } => {
            run_translate(
                cli.config.as_deref(),
                cli.log_level.as_deref(),
                &descriptor,
                year,
            )?;
        }
    }

    Ok(())
}
