//! Schedule kinds and interval units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ScheduleError;

/// Discriminator of a schedule descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Fixed interval, translated to `rate(...)`
    Interval,
    /// Once a day
    Daily,
    /// Once a week on a named weekday
    Weekly,
    /// Once a month on a day of the month
    Monthly,
    /// Once a year on a month and day
    Yearly,
}

impl ScheduleKind {
    /// Every kind, in the order they are listed to users.
    pub const ALL: [ScheduleKind; 5] = [
        ScheduleKind::Interval,
        ScheduleKind::Daily,
        ScheduleKind::Weekly,
        ScheduleKind::Monthly,
        ScheduleKind::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleKind::Interval => "interval",
            ScheduleKind::Daily => "daily",
            ScheduleKind::Weekly => "weekly",
            ScheduleKind::Monthly => "monthly",
            ScheduleKind::Yearly => "yearly",
        }
    }

    /// Parameter names accepted for this kind, in validation order.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            ScheduleKind::Interval => &["unit", "duration"],
            ScheduleKind::Daily => &["hour", "minute"],
            ScheduleKind::Weekly => &["day", "hour", "minute"],
            ScheduleKind::Monthly => &["day", "hour", "minute"],
            ScheduleKind::Yearly => &["month", "day", "hour", "minute"],
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleKind {
    type Err = ScheduleError;

    /// Exact, case-sensitive match on the kind name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ScheduleError::UnknownType(s.to_string()))
    }
}

/// Unit of an interval schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Minute,
    Hour,
    Day,
}

impl IntervalUnit {
    /// Allowed unit names, as listed in error messages.
    pub const NAMES: [&'static str; 3] = ["day", "hour", "minute"];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Minute => "minute",
            IntervalUnit::Hour => "hour",
            IntervalUnit::Day => "day",
        }
    }

    /// Look up a unit by its exact name. Plurals and other casings are rejected.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "minute" => Some(IntervalUnit::Minute),
            "hour" => Some(IntervalUnit::Hour),
            "day" => Some(IntervalUnit::Day),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
