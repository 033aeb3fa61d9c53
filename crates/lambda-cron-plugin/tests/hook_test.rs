//! Before-package hook tests against in-memory service definitions.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use lambda_cron_plugin::{
    LambdaCronPlugin, MemorySink, PluginError, ServiceDefinition, Settings,
};
use lambda_cron_schedule::{ScheduleError, TranslatorConfig};

fn service_with(stage_config: Value) -> ServiceDefinition {
    ServiceDefinition::from_value(json!({
        "service": "reports",
        "provider": { "name": "aws", "stage": "dev" },
        "custom": { "lambda-cron": { "dev": stage_config } },
        "functions": {
            "hello": { "handler": ".src/handler.hello", "name": "hello", "events": [] },
            "report": { "handler": ".src/handler.report" }
        }
    }))
    .unwrap()
}

fn hello_schedule(schedule: Value) -> ServiceDefinition {
    service_with(json!({ "hello": { "schedule": schedule } }))
}

fn plugin_for_year(year: i32) -> LambdaCronPlugin {
    LambdaCronPlugin::new(Settings {
        translator: TranslatorConfig::with_year(year),
        ..Default::default()
    })
}

#[test]
fn test_no_cron_config_for_stage() {
    let mut service = ServiceDefinition::from_value(json!({
        "provider": { "name": "aws", "stage": "dev" },
        "functions": { "hello": { "handler": "h" } }
    }))
    .unwrap();
    let before = service.clone();
    let sink = MemorySink::new();

    let report = LambdaCronPlugin::default()
        .before_package(&mut service, &sink)
        .unwrap();

    assert!(report.scheduled.is_empty());
    assert_eq!(report.stage, "dev");
    assert_eq!(
        sink.lines(),
        vec!["No cron job configurations found for stage dev"]
    );
    assert_eq!(service, before);
}

#[test]
fn test_config_for_other_stage_only() {
    let mut service = ServiceDefinition::from_value(json!({
        "provider": { "stage": "prod" },
        "custom": { "lambda-cron": { "dev": { "hello": { "schedule": { "type": "daily", "params": { "hour": 1 } } } } } },
        "functions": { "hello": { "handler": "h" } }
    }))
    .unwrap();
    let sink = MemorySink::new();
    LambdaCronPlugin::default()
        .before_package(&mut service, &sink)
        .unwrap();
    assert_eq!(
        sink.lines(),
        vec!["No cron job configurations found for stage prod"]
    );
    assert_eq!(service.functions["hello"].event_count(), 0);
}

#[test]
fn test_schedule_cannot_be_empty() {
    let mut service = service_with(json!({ "hello": {} }));
    let err = LambdaCronPlugin::default()
        .before_package(&mut service, &MemorySink::new())
        .unwrap_err();
    assert!(err.to_string().contains("schedule can not be empty"));
}

#[test]
fn test_invalid_schedule_type() {
    let mut service = hello_schedule(json!({ "type": "invalid" }));
    let err = LambdaCronPlugin::default()
        .before_package(&mut service, &MemorySink::new())
        .unwrap_err();
    assert!(matches!(
        err.schedule_error(),
        Some(ScheduleError::UnknownType(name)) if name == "invalid"
    ));
}

#[test]
fn test_interval_event_attached() {
    let mut service = service_with(json!({
        "hello": {
            "schedule": { "type": "interval", "params": { "unit": "minute", "duration": 20 } },
            "input": { "source": "cron" }
        }
    }));
    let sink = MemorySink::new();

    LambdaCronPlugin::default()
        .before_package(&mut service, &sink)
        .unwrap();

    assert_eq!(
        service.functions["hello"].events.clone().unwrap(),
        vec![json!({ "schedule": { "rate": ["rate(20 minute)"], "input": { "source": "cron" } } })]
    );
    assert_eq!(sink.lines(), vec!["scheduled cron for: hello (rate(20 minute))"]);
}

#[test]
fn test_daily_minute_default_logged_before_summary() {
    let mut service = hello_schedule(json!({ "type": "daily", "params": { "hour": 2 } }));
    let sink = MemorySink::new();

    LambdaCronPlugin::default()
        .before_package(&mut service, &sink)
        .unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            "minute is not provided in params default value is set to 0",
            "scheduled cron for: hello (cron(0 2 * * ? *))",
        ]
    );
}

#[test]
fn test_weekly_hour_and_minute_defaults() {
    let mut service = hello_schedule(json!({ "type": "weekly", "params": { "day": "Sunday" } }));
    let sink = MemorySink::new();

    LambdaCronPlugin::default()
        .before_package(&mut service, &sink)
        .unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            "hour is not provided in params default value is set to 0",
            "minute is not provided in params default value is set to 0",
            "scheduled cron for: hello (cron(0 0 ? * 1 *))",
        ]
    );
}

#[test]
fn test_yearly_defaults_logged_in_field_order() {
    let mut service = hello_schedule(json!({ "type": "yearly", "params": { "month": 2 } }));
    let sink = MemorySink::new();

    plugin_for_year(2023)
        .before_package(&mut service, &sink)
        .unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            "day is not provided in params default value is set to 1st day of the month",
            "hour is not provided in params default value is set to 0",
            "minute is not provided in params default value is set to 0",
            "scheduled cron for: hello (cron(0 0 1 2 ? *))",
        ]
    );
}

#[test]
fn test_leap_day_depends_on_reference_year() {
    let schedule = json!({ "type": "yearly", "params": { "month": 2, "day": 29, "hour": 15, "minute": 45 } });

    let mut service = hello_schedule(schedule.clone());
    let report = plugin_for_year(2024)
        .before_package(&mut service, &MemorySink::new())
        .unwrap();
    assert_eq!(report.scheduled[0].expression.to_string(), "cron(45 15 29 2 ? *)");

    let mut service = hello_schedule(schedule);
    let err = plugin_for_year(2023)
        .before_package(&mut service, &MemorySink::new())
        .unwrap_err();
    assert!(err.to_string().contains("between 1 and 28"));
}

#[test]
fn test_events_appended_after_existing_ones() {
    let mut service = ServiceDefinition::from_value(json!({
        "provider": { "stage": "dev" },
        "custom": { "lambda-cron": { "dev": {
            "hello": { "schedule": { "type": "monthly", "params": { "day": 16, "hour": 16, "minute": 16 } } }
        } } },
        "functions": { "hello": { "handler": "h", "events": [{ "http": "GET /" }] } }
    }))
    .unwrap();

    LambdaCronPlugin::default()
        .before_package(&mut service, &MemorySink::new())
        .unwrap();

    assert_eq!(
        service.functions["hello"].events.clone().unwrap(),
        vec![
            json!({ "http": "GET /" }),
            json!({ "schedule": { "rate": ["cron(16 16 16 * ? *)"] } }),
        ]
    );
}

#[test]
fn test_function_without_events_gets_event_list() {
    let mut service = service_with(json!({
        "report": { "schedule": { "type": "daily", "params": { "hour": 0, "minute": 0 } } }
    }));
    assert!(service.functions["report"].events.is_none());

    LambdaCronPlugin::default()
        .before_package(&mut service, &MemorySink::new())
        .unwrap();

    assert_eq!(service.functions["report"].event_count(), 1);
}

#[test]
fn test_one_bad_entry_leaves_every_function_untouched() {
    let mut service = service_with(json!({
        "hello": { "schedule": { "type": "daily", "params": { "hour": 2 } } },
        "report": { "schedule": { "type": "daily", "params": { "hour": 99 } } }
    }));
    let before = service.clone();
    let sink = MemorySink::new();

    let err = LambdaCronPlugin::default()
        .before_package(&mut service, &sink)
        .unwrap_err();

    match err {
        PluginError::Schedule { function, source } => {
            assert_eq!(function, "report");
            assert!(matches!(source, ScheduleError::OutOfRange { param: "hour", .. }));
        }
        other => panic!("Expected schedule error, got {other:?}"),
    }
    assert_eq!(service, before);
    assert!(sink.lines().is_empty());
}

#[test]
fn test_first_error_wins() {
    let mut service = service_with(json!({
        "hello": { "schedule": { "type": "weekly", "params": {} } },
        "report": { "schedule": { "type": "hourly" } }
    }));
    let err = LambdaCronPlugin::default()
        .before_package(&mut service, &MemorySink::new())
        .unwrap_err();
    assert!(matches!(
        err,
        PluginError::Schedule { ref function, .. } if function == "hello"
    ));
}

#[test]
fn test_unknown_function() {
    let mut service = service_with(json!({
        "ghost": { "schedule": { "type": "daily", "params": { "hour": 2 } } }
    }));
    let err = LambdaCronPlugin::default()
        .before_package(&mut service, &MemorySink::new())
        .unwrap_err();
    assert!(matches!(err, PluginError::FunctionNotFound(name) if name == "ghost"));
}

#[test]
fn test_functions_scheduled_in_configuration_order() {
    let mut service = service_with(json!({
        "report": { "schedule": { "type": "interval", "params": { "unit": "day", "duration": 1 } } },
        "hello": { "schedule": { "type": "interval", "params": { "unit": "hour", "duration": 1 } } }
    }));
    let report = LambdaCronPlugin::default()
        .before_package(&mut service, &MemorySink::new())
        .unwrap();
    let order: Vec<_> = report.scheduled.iter().map(|s| s.function.as_str()).collect();
    assert_eq!(order, vec!["report", "hello"]);
}
