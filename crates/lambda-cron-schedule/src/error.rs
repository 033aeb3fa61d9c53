//! Error types for schedule translation.
//!
//! Every failure is a deterministic input-validation defect: there is no
//! retryable class, and the translator never recovers from one locally.

use std::fmt;

use thiserror::Error;

use crate::ScheduleKind;

/// Inclusive bounds of a numeric parameter, used in range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    /// `None` means the parameter has no upper bound.
    pub max: Option<i64>,
}

impl Bounds {
    pub const fn between(min: i64, max: i64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: i64) -> Self {
        Self { min, max: None }
    }

    /// Check whether `value` lies within these bounds.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "between {} and {}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// Errors that can occur while validating or translating a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The descriptor itself is absent or null
    #[error("schedule can not be empty")]
    Empty,

    /// The `type` discriminator is not one of the known kinds
    #[error(
        "Invalid schedule type: '{0}'. cron can be scheduled with only given types: \"interval\", \"daily\", \"weekly\", \"monthly\", \"yearly\"."
    )]
    UnknownType(String),

    /// A required parameter is absent
    #[error("Missing param: {param} is required for {kind} schedule")]
    MissingParameter {
        param: &'static str,
        kind: ScheduleKind,
    },

    /// A parameter is present but has the wrong primitive type
    #[error("Invalid param: {param} must be {expected}")]
    TypeMismatch {
        param: &'static str,
        expected: &'static str,
    },

    /// A numeric parameter is outside its closed range
    #[error("Invalid param: {param} must be a number {bounds} for {kind} schedule, got {value}")]
    OutOfRange {
        param: &'static str,
        value: i64,
        bounds: Bounds,
        kind: ScheduleKind,
    },

    /// A string parameter is not one of its allowed values
    #[error(
        "Invalid param: invalid {param} '{value}' for {kind} schedule. Allowed values are: {allowed}"
    )]
    InvalidEnumeration {
        param: &'static str,
        value: String,
        allowed: String,
        kind: ScheduleKind,
    },

    /// A parameter that does not belong to the selected kind
    #[error("Invalid param: {param} is not a valid parameter for {kind} schedule")]
    UnexpectedParameter { param: String, kind: ScheduleKind },
}

impl ScheduleError {
    /// Name of the offending parameter, if the error concerns one.
    pub fn param(&self) -> Option<&str> {
        match self {
            ScheduleError::Empty | ScheduleError::UnknownType(_) => None,
            ScheduleError::MissingParameter { param, .. }
            | ScheduleError::TypeMismatch { param, .. }
            | ScheduleError::OutOfRange { param, .. }
            | ScheduleError::InvalidEnumeration { param, .. } => Some(*param),
            ScheduleError::UnexpectedParameter { param, .. } => Some(param.as_str()),
        }
    }
}
