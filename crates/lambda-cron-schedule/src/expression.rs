//! Canonical schedule expressions.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{IntervalUnit, Weekday};

/// One field of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronField {
    /// `*`
    Every,
    /// `?`
    NoSpecificValue,
    /// A literal number
    Value(u32),
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CronField::Every => f.write_str("*"),
            CronField::NoSpecificValue => f.write_str("?"),
            CronField::Value(value) => write!(f, "{}", value),
        }
    }
}

/// Six-field cron expression: minute hour day-of-month month day-of-week year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CronExpression {
    pub minute: u32,
    pub hour: u32,
    pub day_of_month: CronField,
    pub month: CronField,
    pub day_of_week: CronField,
    pub year: CronField,
}

impl CronExpression {
    /// Every day at `hour:minute`.
    pub fn daily(hour: u32, minute: u32) -> Self {
        Self {
            minute,
            hour,
            day_of_month: CronField::Every,
            month: CronField::Every,
            day_of_week: CronField::NoSpecificValue,
            year: CronField::Every,
        }
    }

    /// Every `day` of the week at `hour:minute`.
    pub fn weekly(day: Weekday, hour: u32, minute: u32) -> Self {
        Self {
            minute,
            hour,
            day_of_month: CronField::NoSpecificValue,
            month: CronField::Every,
            day_of_week: CronField::Value(day.ordinal()),
            year: CronField::Every,
        }
    }

    /// The given day of every month at `hour:minute`.
    pub fn monthly(day: u32, hour: u32, minute: u32) -> Self {
        Self {
            minute,
            hour,
            day_of_month: CronField::Value(day),
            month: CronField::Every,
            day_of_week: CronField::NoSpecificValue,
            year: CronField::Every,
        }
    }

    /// The given month and day of every year at `hour:minute`.
    pub fn yearly(month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            minute,
            hour,
            day_of_month: CronField::Value(day),
            month: CronField::Value(month),
            day_of_week: CronField::NoSpecificValue,
            year: CronField::Every,
        }
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cron({} {} {} {} {} {})",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week, self.year
        )
    }
}

/// A translated schedule, rendered as `rate(...)` or `cron(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleExpression {
    Rate { duration: u64, unit: IntervalUnit },
    Cron(CronExpression),
}

impl fmt::Display for ScheduleExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleExpression::Rate { duration, unit } => write!(f, "rate({} {})", duration, unit),
            ScheduleExpression::Cron(cron) => fmt::Display::fmt(cron, f),
        }
    }
}

impl Serialize for ScheduleExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
