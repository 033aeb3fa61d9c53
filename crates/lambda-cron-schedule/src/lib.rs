//! Schedule validation and translation for lambda-cron.
//!
//! Turns small, loosely typed schedule descriptors into canonical schedule
//! expressions:
//!
//! - `interval` descriptors become `rate(<duration> <unit>)`
//! - `daily`, `weekly`, `monthly` and `yearly` descriptors become six-field
//!   `cron(<minute> <hour> <day-of-month> <month> <day-of-week> <year>)`
//!
//! Translation is pure. Optional parameters that were left out are defaulted
//! and reported back as [`DefaultNotice`]s instead of being logged here, so
//! the caller decides where they go.
//!
//! # Example
//!
//! ```
//! use lambda_cron_schedule::Translator;
//! use serde_json::json;
//!
//! let translator = Translator::default();
//!
//! let raw = json!({ "type": "interval", "params": { "unit": "minute", "duration": 20 } });
//! let translation = translator.translate_value(Some(&raw)).unwrap();
//! assert_eq!(translation.expression.to_string(), "rate(20 minute)");
//!
//! let raw = json!({ "type": "daily", "params": { "hour": 2 } });
//! let translation = translator.translate_value(Some(&raw)).unwrap();
//! assert_eq!(translation.expression.to_string(), "cron(0 2 * * ? *)");
//! assert_eq!(
//!     translation.notices[0].to_string(),
//!     "minute is not provided in params default value is set to 0"
//! );
//! ```

mod calendar;
mod config;
mod descriptor;
mod error;
mod expression;
mod kind;
mod translate;

pub use calendar::{days_in_month, is_leap_year, Weekday};
pub use config::TranslatorConfig;
pub use descriptor::{
    DailyParams, IntervalParams, MonthlyParams, ScheduleDescriptor, WeeklyParams, YearlyParams,
};
pub use error::{Bounds, ScheduleError};
pub use expression::{CronExpression, CronField, ScheduleExpression};
pub use kind::{IntervalUnit, ScheduleKind};
pub use translate::{translate, DefaultNotice, Translation, Translator};
