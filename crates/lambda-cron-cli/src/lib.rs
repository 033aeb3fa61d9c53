//! lambda-cron CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (package, validate, translate)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    package_service, run_package, run_translate, run_validate, translate_descriptor,
    write_service,
};
