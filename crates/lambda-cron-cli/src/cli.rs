//! CLI argument parsing for the lambda-cron dry-run tool.
//!
//! CLI flags override all other config sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lambda-cron
///
/// Translates per-stage schedule configuration of a serverless service into
/// schedule events, without packaging or deploying anything.
#[derive(Parser, Debug)]
#[command(name = "lambda-cron")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/lambda-cron/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the before-package hook and write the updated service definition as JSON
    Package {
        /// Service definition file (.json, .yml, .yaml or .toml)
        service: PathBuf,

        /// Stage to package (defaults to the provider's stage)
        #[arg(short, long)]
        stage: Option<String>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate every schedule of a stage and print the resulting expressions
    Validate {
        /// Service definition file (.json, .yml, .yaml or .toml)
        service: PathBuf,

        /// Stage to validate (defaults to the provider's stage)
        #[arg(short, long)]
        stage: Option<String>,
    },

    /// Translate a single schedule descriptor given as JSON
    Translate {
        /// Descriptor, e.g. '{"type":"daily","params":{"hour":2}}'
        descriptor: String,

        /// Reference year for leap-year checks (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}
