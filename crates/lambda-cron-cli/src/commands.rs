//! Command implementations for the lambda-cron CLI.
//!
//! Handles:
//! - package: run the before-package hook and write the updated definition
//! - validate: run the hook and report the expression of every function
//! - translate: translate a single descriptor

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use lambda_cron_plugin::{
    LambdaCronPlugin, LogSink, PackageReport, ServiceDefinition, Settings, TracingSink,
    BEFORE_PACKAGE_HOOK,
};
use lambda_cron_schedule::{Translation, Translator};

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// machine-readable.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Load settings (defaults -> file -> env) and apply CLI overrides.
fn load_settings(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    stage_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    if let Some(stage) = stage_override {
        settings.stage = Some(stage.to_string());
    }

    Ok(settings)
}

/// Read a service definition and run the before-package hook on it.
pub fn package_service(
    settings: Settings,
    service_path: &Path,
    sink: &dyn LogSink,
) -> Result<(ServiceDefinition, PackageReport)> {
    let mut service = ServiceDefinition::from_path(service_path)
        .with_context(|| format!("Failed to load service definition {}", service_path.display()))?;

    let plugin = LambdaCronPlugin::new(settings);
    let report = plugin
        .before_package(&mut service, sink)
        .with_context(|| format!("{} hook failed", BEFORE_PACKAGE_HOOK))?;

    Ok((service, report))
}

/// Write a service definition as pretty JSON to `output`, or stdout.
pub fn write_service(service: &ServiceDefinition, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(service).context("Failed to serialize service")?;
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote service definition to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Parse a JSON descriptor and translate it.
pub fn translate_descriptor(descriptor: &str, translator: &Translator) -> Result<Translation> {
    let raw: serde_json::Value =
        serde_json::from_str(descriptor).context("Descriptor is not valid JSON")?;
    let translation = translator
        .translate_value(Some(&raw))
        .context("Failed to translate schedule")?;
    Ok(translation)
}

/// `package` command.
pub fn run_package(
    config_path: Option<&str>,
    log_level: Option<&str>,
    service_path: &Path,
    stage: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let settings = load_settings(config_path, log_level, stage)?;
    init_logging(&settings.log_level)?;

    let (service, report) = package_service(settings, service_path, &TracingSink)?;
    info!(
        stage = %report.stage,
        scheduled = report.scheduled.len(),
        "Packaging hook complete"
    );

    write_service(&service, output)
}

/// `validate` command.
pub fn run_validate(
    config_path: Option<&str>,
    log_level: Option<&str>,
    service_path: &Path,
    stage: Option<&str>,
) -> Result<()> {
    let settings = load_settings(config_path, log_level, stage)?;
    init_logging(&settings.log_level)?;

    let (_, report) = package_service(settings, service_path, &TracingSink)?;

    if report.scheduled.is_empty() {
        println!("No cron schedules configured for stage {}", report.stage);
        return Ok(());
    }

    println!("Stage {}:", report.stage);
    for scheduled in &report.scheduled {
        println!("  {:<24} {}", scheduled.function, scheduled.expression);
    }

    Ok(())
}

/// `translate` command.
pub fn run_translate(
    config_path: Option<&str>,
    log_level: Option<&str>,
    descriptor: &str,
    year: Option<i32>,
) -> Result<()> {
    let mut settings = load_settings(config_path, log_level, None)?;
    init_logging(&settings.log_level)?;

    if year.is_some() {
        settings.translator.year = year;
    }

    let translation = translate_descriptor(descriptor, &Translator::new(settings.translator))?;
    for notice in &translation.notices {
        TracingSink.info(&notice.to_string());
    }
    println!("{}", translation.expression);

    Ok(())
}
