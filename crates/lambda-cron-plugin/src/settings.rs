//! Settings loading for lambda-cron.
//!
//! Layered config: built-in defaults -> default config file -> CLI-specified
//! config file -> `LAMBDA_CRON_*` environment variables. CLI flags are applied
//! by the caller after loading.

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use lambda_cron_schedule::TranslatorConfig;
use serde::{Deserialize, Serialize};

use crate::PluginError;

/// Key under the service's `custom` section holding the per-stage schedules.
pub const DEFAULT_CONFIG_KEY: &str = "lambda-cron";

/// Plugin settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key under `custom` holding the stage map (older releases used `lambdaCronJobs`)
    #[serde(default = "default_config_key")]
    pub config_key: String,

    /// Stage to package. Takes precedence over the provider's stage.
    #[serde(default)]
    pub stage: Option<String>,

    /// Stage used when neither the settings nor the provider name one
    #[serde(default = "default_stage")]
    pub default_stage: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Translator configuration
    #[serde(default)]
    pub translator: TranslatorConfig,
}

fn default_config_key() -> String {
    DEFAULT_CONFIG_KEY.to_string()
}

fn default_stage() -> String {
    "dev".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_key: default_config_key(),
            stage: None,
            default_stage: default_stage(),
            log_level: default_log_level(),
            translator: TranslatorConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (e.g. ~/.config/lambda-cron/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (LAMBDA_CRON_STAGE, LAMBDA_CRON_TRANSLATOR__YEAR, ...)
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, PluginError> {
        let config_dir = ProjectDirs::from("", "", "lambda-cron")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("config_key", default_config_key())
            .map_err(|e| PluginError::Config(e.to_string()))?
            .set_default("default_stage", default_stage())
            .map_err(|e| PluginError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| PluginError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("LAMBDA_CRON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| PluginError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PluginError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.config_key, "lambda-cron");
        assert_eq!(settings.default_stage, "dev");
        assert_eq!(settings.log_level, "info");
        assert!(settings.stage.is_none());
        assert!(settings.translator.year.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "config_key = \"lambdaCronJobs\"\nstage = \"prod\"\n\n[translator]\nyear = 2024"
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.config_key, "lambdaCronJobs");
        assert_eq!(settings.stage.as_deref(), Some("prod"));
        assert_eq!(settings.translator.year, Some(2024));
        assert_eq!(settings.default_stage, "dev");
    }

    #[test]
    fn test_load_missing_cli_file_fails() {
        let result = Settings::load(Some("/definitely/not/here/lambda-cron.toml"));
        assert!(matches!(result, Err(PluginError::Config(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: Settings = serde_json::from_str(r#"{ "stage": "qa" }"#).unwrap();
        assert_eq!(settings.stage.as_deref(), Some("qa"));
        assert_eq!(settings.config_key, DEFAULT_CONFIG_KEY);
    }
}
