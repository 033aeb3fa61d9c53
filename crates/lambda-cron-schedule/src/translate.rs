//! Range validation, default policy and expression formatting.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Bounds;
use crate::{
    days_in_month, CronExpression, ScheduleDescriptor, ScheduleError, ScheduleExpression,
    ScheduleKind, TranslatorConfig,
};

const HOUR: Bounds = Bounds::between(0, 24);
const MINUTE: Bounds = Bounds::between(0, 59);
const DAY_OF_MONTH: Bounds = Bounds::between(1, 31);
const MONTH: Bounds = Bounds::between(1, 12);
const DURATION: Bounds = Bounds::at_least(1);

/// Record that an optional parameter was absent and has been defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefaultNotice {
    pub kind: ScheduleKind,
    pub param: &'static str,
    pub value: u32,
}

impl fmt::Display for DefaultNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ScheduleKind::Yearly && self.param == "day" {
            write!(
                f,
                "day is not provided in params default value is set to 1st day of the month"
            )
        } else {
            write!(
                f,
                "{} is not provided in params default value is set to {}",
                self.param, self.value
            )
        }
    }
}

/// Result of a successful translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub expression: ScheduleExpression,
    /// Defaulted optional parameters, in parameter order.
    pub notices: Vec<DefaultNotice>,
}

/// Translates schedule descriptors into `rate(...)` / `cron(...)` expressions.
///
/// The translator holds no state besides its configuration, so translating
/// the same descriptor twice always yields the same expression (for a fixed
/// reference year).
///
/// # Example
///
/// ```
/// use lambda_cron_schedule::Translator;
/// use serde_json::json;
///
/// let translator = Translator::with_year(2024);
/// let raw = json!({ "type": "yearly", "params": { "month": 2, "day": 29, "hour": 15, "minute": 45 } });
/// let translation = translator.translate_value(Some(&raw)).unwrap();
/// assert_eq!(translation.expression.to_string(), "cron(45 15 29 2 ? *)");
/// assert!(translation.notices.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Translator whose leap-year evaluation uses a fixed year.
    pub fn with_year(year: i32) -> Self {
        Self::new(TranslatorConfig::with_year(year))
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Validate ranges, apply defaults and format the expression.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::OutOfRange` for the first parameter outside
    /// its bounds. No expression is produced on failure.
    pub fn translate(&self, descriptor: &ScheduleDescriptor) -> Result<Translation, ScheduleError> {
        let kind = descriptor.kind();
        let mut params = ParamCheck {
            kind,
            notices: Vec::new(),
        };

        let expression = match *descriptor {
            ScheduleDescriptor::Interval(interval) => {
                let duration = params.bounded("duration", interval.duration, DURATION)?;
                ScheduleExpression::Rate {
                    duration: duration as u64,
                    unit: interval.unit,
                }
            }
            ScheduleDescriptor::Daily(daily) => {
                let hour = params.bounded("hour", daily.hour, HOUR)? as u32;
                let minute = params.optional("minute", daily.minute, MINUTE, 0)?;
                ScheduleExpression::Cron(CronExpression::daily(hour, minute))
            }
            ScheduleDescriptor::Weekly(weekly) => {
                let hour = params.optional("hour", weekly.hour, HOUR, 0)?;
                let minute = params.optional("minute", weekly.minute, MINUTE, 0)?;
                ScheduleExpression::Cron(CronExpression::weekly(weekly.day, hour, minute))
            }
            ScheduleDescriptor::Monthly(monthly) => {
                let day = params.bounded("day", monthly.day, DAY_OF_MONTH)? as u32;
                let hour = params.optional("hour", monthly.hour, HOUR, 0)?;
                let minute = params.optional("minute", monthly.minute, MINUTE, 0)?;
                ScheduleExpression::Cron(CronExpression::monthly(day, hour, minute))
            }
            ScheduleDescriptor::Yearly(yearly) => {
                let month = params.bounded("month", yearly.month, MONTH)? as u32;
                let last_day = days_in_month(month, self.config.reference_year()).unwrap_or(31);
                let day = params.optional(
                    "day",
                    yearly.day,
                    Bounds::between(1, i64::from(last_day)),
                    1,
                )?;
                let hour = params.optional("hour", yearly.hour, HOUR, 0)?;
                let minute = params.optional("minute", yearly.minute, MINUTE, 0)?;
                ScheduleExpression::Cron(CronExpression::yearly(month, day, hour, minute))
            }
        };

        debug!(
            kind = %kind,
            expression = %expression,
            defaults = params.notices.len(),
            "Translated schedule"
        );

        Ok(Translation {
            expression,
            notices: params.notices,
        })
    }

    /// Build a descriptor from a raw value and translate it.
    pub fn translate_value(&self, value: Option<&Value>) -> Result<Translation, ScheduleError> {
        let descriptor = ScheduleDescriptor::from_value(value)?;
        self.translate(&descriptor)
    }
}

/// Translate a descriptor, evaluating leap years against the current year.
pub fn translate(descriptor: &ScheduleDescriptor) -> Result<Translation, ScheduleError> {
    Translator::default().translate(descriptor)
}

/// Range checks for one descriptor, collecting default notices as it goes.
struct ParamCheck {
    kind: ScheduleKind,
    notices: Vec<DefaultNotice>,
}

impl ParamCheck {
    fn bounded(&self, param: &'static str, value: i64, bounds: Bounds) -> Result<i64, ScheduleError> {
        if bounds.contains(value) {
            Ok(value)
        } else {
            Err(ScheduleError::OutOfRange {
                param,
                value,
                bounds,
                kind: self.kind,
            })
        }
    }

    /// Check a present value, or default an absent one and record a notice.
    fn optional(
        &mut self,
        param: &'static str,
        value: Option<i64>,
        bounds: Bounds,
        default: u32,
    ) -> Result<u32, ScheduleError> {
        match value {
            Some(value) => Ok(self.bounded(param, value, bounds)? as u32),
            None => {
                self.notices.push(DefaultNotice {
                    kind: self.kind,
                    param,
                    value: default,
                });
                Ok(default)
            }
        }
    }
}
