//! Serverless plugin glue for lambda-cron.
//!
//! Reads the per-stage schedule section of a service definition
//! (`custom.lambda-cron.<stage>.<function>`), translates each schedule with
//! [`lambda_cron_schedule`], and appends the resulting
//! `{ schedule: { rate: [...], input } }` events to the matching functions.
//!
//! # Example
//!
//! ```
//! use lambda_cron_plugin::{LambdaCronPlugin, MemorySink, ServiceDefinition};
//! use serde_json::json;
//!
//! let mut service = ServiceDefinition::from_value(json!({
//!     "provider": { "name": "aws", "stage": "dev" },
//!     "custom": {
//!         "lambda-cron": {
//!             "dev": {
//!                 "hello": { "schedule": { "type": "daily", "params": { "hour": 2, "minute": 30 } } }
//!             }
//!         }
//!     },
//!     "functions": { "hello": { "handler": "src/handler.hello" } }
//! }))
//! .unwrap();
//!
//! let sink = MemorySink::new();
//! let report = LambdaCronPlugin::default()
//!     .before_package(&mut service, &sink)
//!     .unwrap();
//!
//! assert_eq!(report.scheduled[0].expression.to_string(), "cron(30 2 * * ? *)");
//! assert_eq!(service.functions["hello"].event_count(), 1);
//! ```

mod error;
mod event;
mod hook;
mod service;
mod settings;
mod sink;

pub use error::PluginError;
pub use event::{EventDescriptor, ScheduleEvent};
pub use hook::{CronJobConfig, LambdaCronPlugin, PackageReport, ScheduledFunction, BEFORE_PACKAGE_HOOK};
pub use service::{FunctionDefinition, ProviderConfig, ServiceDefinition, ServiceFormat};
pub use settings::{Settings, DEFAULT_CONFIG_KEY};
pub use sink::{LogSink, MemorySink, TracingSink};
