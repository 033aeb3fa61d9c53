//! The before-package hook: translate every configured schedule for the
//! active stage and attach the resulting events to their functions.

use lambda_cron_schedule::{DefaultNotice, ScheduleExpression, Translation, Translator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{EventDescriptor, LogSink, PluginError, ServiceDefinition, Settings};

/// Lifecycle event the plugin runs on.
pub const BEFORE_PACKAGE_HOOK: &str = "before:package:initialize";

/// One function's entry in the stage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CronJobConfig {
    /// Raw schedule descriptor
    #[serde(default)]
    pub schedule: Option<Value>,

    /// Payload handed to the function on every scheduled invocation
    #[serde(default)]
    pub input: Option<Value>,
}

impl CronJobConfig {
    fn from_entry(function: &str, value: &Value) -> Result<Self, PluginError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value.clone()).map_err(|e| {
                PluginError::InvalidConfig(format!("entry for function {}: {}", function, e))
            }),
            _ => Err(PluginError::InvalidConfig(format!(
                "entry for function {} must be a mapping with a schedule",
                function
            ))),
        }
    }
}

/// A function that received a schedule event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledFunction {
    pub function: String,
    pub expression: ScheduleExpression,
    pub notices: Vec<DefaultNotice>,
}

/// Outcome of one before-package invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub stage: String,
    /// Scheduled functions in configuration order
    pub scheduled: Vec<ScheduledFunction>,
}

impl PackageReport {
    fn empty(stage: String) -> Self {
        Self {
            stage,
            scheduled: Vec::new(),
        }
    }
}

/// Translates per-stage schedule configuration into function events.
#[derive(Debug, Clone)]
pub struct LambdaCronPlugin {
    settings: Settings,
    translator: Translator,
}

impl LambdaCronPlugin {
    pub fn new(settings: Settings) -> Self {
        let translator = Translator::new(settings.translator);
        Self {
            settings,
            translator,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stage to package: settings stage, then the provider's stage, then the
    /// configured default.
    pub fn resolve_stage(&self, service: &ServiceDefinition) -> String {
        self.settings
            .stage
            .clone()
            .or_else(|| service.provider.stage.clone())
            .unwrap_or_else(|| self.settings.default_stage.clone())
    }

    /// Entries configured for `stage`, in configuration order.
    ///
    /// Returns `Ok(None)` when the plugin section or the stage section is
    /// missing. A `null` stage section yields no entries.
    pub fn stage_entries(
        &self,
        service: &ServiceDefinition,
        stage: &str,
    ) -> Result<Option<Vec<(String, CronJobConfig)>>, PluginError> {
        let key = &self.settings.config_key;
        let stages = match service.custom.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Object(stages)) => stages,
            Some(_) => {
                return Err(PluginError::InvalidConfig(format!(
                    "custom.{} must be a mapping of stage names",
                    key
                )))
            }
        };

        match stages.get(stage) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(Vec::new())),
            Some(Value::Object(entries)) => entries
                .iter()
                .map(|(function, entry)| {
                    CronJobConfig::from_entry(function, entry).map(|job| (function.clone(), job))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(PluginError::InvalidConfig(format!(
                "custom.{}.{} must be a mapping of function names",
                key, stage
            ))),
        }
    }

    /// Run the before-package hook against `service`.
    ///
    /// Every entry is translated before any event is attached, so a failing
    /// entry leaves all function definitions untouched. The first failure
    /// wins and later entries are not translated.
    ///
    /// # Errors
    ///
    /// - `PluginError::FunctionNotFound` if an entry names an unknown function
    /// - `PluginError::Schedule` if an entry's descriptor is invalid
    /// - `PluginError::InvalidConfig` if the plugin section is malformed
    pub fn before_package(
        &self,
        service: &mut ServiceDefinition,
        sink: &dyn LogSink,
    ) -> Result<PackageReport, PluginError> {
        let stage = self.resolve_stage(service);

        let Some(entries) = self.stage_entries(service, &stage)? else {
            sink.info(&format!(
                "No cron job configurations found for stage {}",
                stage
            ));
            return Ok(PackageReport::empty(stage));
        };

        debug!(stage = %stage, entries = entries.len(), "Translating cron schedules");

        let mut planned: Vec<(String, Option<Value>, Translation)> =
            Vec::with_capacity(entries.len());
        for (function, job) in entries {
            if !service.functions.contains_key(&function) {
                return Err(PluginError::FunctionNotFound(function));
            }
            let translation = self
                .translator
                .translate_value(job.schedule.as_ref())
                .map_err(|source| PluginError::Schedule {
                    function: function.clone(),
                    source,
                })?;
            planned.push((function, job.input, translation));
        }

        let mut report = PackageReport::empty(stage);
        for (function, input, translation) in planned {
            for notice in &translation.notices {
                sink.info(&notice.to_string());
            }

            let event = EventDescriptor::new(&translation.expression, input);
            let definition = service
                .functions
                .get_mut(&function)
                .ok_or_else(|| PluginError::FunctionNotFound(function.clone()))?;
            definition.push_event(&event)?;

            sink.info(&format!(
                "scheduled cron for: {} ({})",
                function, translation.expression
            ));

            report.scheduled.push(ScheduledFunction {
                function,
                expression: translation.expression,
                notices: translation.notices,
            });
        }

        debug!(
            stage = %report.stage,
            scheduled = report.scheduled.len(),
            "Cron schedules attached"
        );

        Ok(report)
    }
}

impl Default for LambdaCronPlugin {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySink;
    use serde_json::json;

    fn service(custom: Value) -> ServiceDefinition {
        ServiceDefinition::from_value(json!({
            "provider": { "name": "aws", "stage": "dev" },
            "custom": custom,
            "functions": {
                "hello": { "handler": "src/handler.hello", "events": [] }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_stage_precedence() {
        let svc = service(json!({}));
        let plugin = LambdaCronPlugin::default();
        assert_eq!(plugin.resolve_stage(&svc), "dev");

        let plugin = LambdaCronPlugin::new(Settings {
            stage: Some("prod".to_string()),
            ..Default::default()
        });
        assert_eq!(plugin.resolve_stage(&svc), "prod");

        let bare = ServiceDefinition::default();
        let plugin = LambdaCronPlugin::new(Settings {
            default_stage: "local".to_string(),
            ..Default::default()
        });
        assert_eq!(plugin.resolve_stage(&bare), "local");
    }

    #[test]
    fn test_stage_entries_missing_section() {
        let plugin = LambdaCronPlugin::default();
        let svc = service(json!({ "lambda-cron": { "prod": {} } }));
        assert!(plugin.stage_entries(&svc, "dev").unwrap().is_none());
        assert!(plugin.stage_entries(&ServiceDefinition::default(), "dev").unwrap().is_none());
    }

    #[test]
    fn test_stage_entries_null_section_is_empty() {
        let plugin = LambdaCronPlugin::default();
        let svc = service(json!({ "lambda-cron": { "dev": null } }));
        assert_eq!(plugin.stage_entries(&svc, "dev").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_stage_entries_malformed() {
        let plugin = LambdaCronPlugin::default();
        let svc = service(json!({ "lambda-cron": ["dev"] }));
        assert!(matches!(
            plugin.stage_entries(&svc, "dev"),
            Err(PluginError::InvalidConfig(_))
        ));

        let svc = service(json!({ "lambda-cron": { "dev": { "hello": "daily" } } }));
        assert!(matches!(
            plugin.stage_entries(&svc, "dev"),
            Err(PluginError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_null_entry_is_empty_schedule() {
        let plugin = LambdaCronPlugin::default();
        let mut svc = service(json!({ "lambda-cron": { "dev": { "hello": null } } }));
        let err = plugin.before_package(&mut svc, &MemorySink::new()).unwrap_err();
        assert_eq!(
            err.schedule_error(),
            Some(&lambda_cron_schedule::ScheduleError::Empty)
        );
    }

    #[test]
    fn test_custom_config_key() {
        let plugin = LambdaCronPlugin::new(Settings {
            config_key: "lambdaCronJobs".to_string(),
            ..Default::default()
        });
        let mut svc = service(json!({
            "lambdaCronJobs": {
                "dev": {
                    "hello": { "schedule": { "type": "interval", "params": { "unit": "hour", "duration": 2 } } }
                }
            }
        }));
        let report = plugin.before_package(&mut svc, &MemorySink::new()).unwrap();
        assert_eq!(report.scheduled.len(), 1);
        assert_eq!(report.scheduled[0].expression.to_string(), "rate(2 hour)");
    }
}
