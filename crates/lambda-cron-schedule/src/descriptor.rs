//! Typed schedule descriptors and their construction from raw configuration.
//!
//! Raw descriptors arrive as loosely typed values of the shape
//! `{ "type": "<kind>", "params": { ... } }`. [`ScheduleDescriptor::from_value`]
//! performs the shape checks (presence, primitive types, enumerations and
//! foreign parameters) and produces a typed descriptor. Numeric ranges are
//! checked later by the [`Translator`](crate::Translator), since the day bound
//! of a yearly schedule depends on the reference year.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{IntervalUnit, ScheduleError, ScheduleKind, Weekday};

/// Parameters of an interval schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalParams {
    pub unit: IntervalUnit,
    pub duration: i64,
}

/// Parameters of a daily schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyParams {
    pub hour: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
}

/// Parameters of a weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklyParams {
    pub day: Weekday,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
}

/// Parameters of a monthly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyParams {
    pub day: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
}

/// Parameters of a yearly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyParams {
    pub month: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
}

/// A schedule descriptor: exactly one kind with its own parameter shape.
///
/// Serializes back to the raw `{ "type": ..., "params": ... }` shape, with
/// absent optional parameters omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum ScheduleDescriptor {
    Interval(IntervalParams),
    Daily(DailyParams),
    Weekly(WeeklyParams),
    Monthly(MonthlyParams),
    Yearly(YearlyParams),
}

impl ScheduleDescriptor {
    /// Build a typed descriptor from a raw configuration value.
    ///
    /// `None` and `null` are both treated as an absent descriptor. A `null`
    /// parameter is treated as absent, and so is an empty string for a
    /// required string parameter.
    ///
    /// # Errors
    ///
    /// Returns the first shape violation found, checking the discriminator,
    /// foreign parameters, then each parameter in declaration order.
    ///
    /// # Example
    ///
    /// ```
    /// use lambda_cron_schedule::{ScheduleDescriptor, ScheduleKind};
    /// use serde_json::json;
    ///
    /// let raw = json!({ "type": "weekly", "params": { "day": "Sunday", "hour": 15 } });
    /// let descriptor = ScheduleDescriptor::from_value(Some(&raw)).unwrap();
    /// assert_eq!(descriptor.kind(), ScheduleKind::Weekly);
    ///
    /// assert!(ScheduleDescriptor::from_value(None).is_err());
    /// ```
    pub fn from_value(value: Option<&Value>) -> Result<Self, ScheduleError> {
        let object = match value {
            None | Some(Value::Null) => return Err(ScheduleError::Empty),
            Some(Value::Object(object)) => object,
            Some(_) => {
                return Err(ScheduleError::TypeMismatch {
                    param: "schedule",
                    expected: "an object",
                })
            }
        };

        let kind = match object.get("type") {
            Some(Value::String(name)) => name.parse::<ScheduleKind>()?,
            None | Some(Value::Null) => return Err(ScheduleError::UnknownType(String::new())),
            Some(other) => return Err(ScheduleError::UnknownType(other.to_string())),
        };

        let reader = ParamReader::new(kind, object.get("params"))?;

        let descriptor = match kind {
            ScheduleKind::Interval => {
                reader.require_all(&["unit", "duration"])?;
                let unit = reader.required_string("unit")?;
                let unit =
                    IntervalUnit::from_name(unit).ok_or_else(|| ScheduleError::InvalidEnumeration {
                        param: "unit",
                        value: unit.to_string(),
                        allowed: IntervalUnit::NAMES.join(","),
                        kind,
                    })?;
                ScheduleDescriptor::Interval(IntervalParams {
                    unit,
                    duration: reader.required_integer("duration")?,
                })
            }
            ScheduleKind::Daily => ScheduleDescriptor::Daily(DailyParams {
                hour: reader.required_integer("hour")?,
                minute: reader.optional_integer("minute")?,
            }),
            ScheduleKind::Weekly => {
                let day = reader.required_string("day")?;
                let day = Weekday::from_name(day).ok_or_else(|| ScheduleError::InvalidEnumeration {
                    param: "day",
                    value: day.to_string(),
                    allowed: Weekday::allowed_names(),
                    kind,
                })?;
                ScheduleDescriptor::Weekly(WeeklyParams {
                    day,
                    hour: reader.optional_integer("hour")?,
                    minute: reader.optional_integer("minute")?,
                })
            }
            ScheduleKind::Monthly => ScheduleDescriptor::Monthly(MonthlyParams {
                day: reader.required_integer("day")?,
                hour: reader.optional_integer("hour")?,
                minute: reader.optional_integer("minute")?,
            }),
            ScheduleKind::Yearly => ScheduleDescriptor::Yearly(YearlyParams {
                month: reader.required_integer("month")?,
                day: reader.optional_integer("day")?,
                hour: reader.optional_integer("hour")?,
                minute: reader.optional_integer("minute")?,
            }),
        };

        Ok(descriptor)
    }

    /// The kind of this descriptor.
    pub fn kind(&self) -> ScheduleKind {
        match self {
            ScheduleDescriptor::Interval(_) => ScheduleKind::Interval,
            ScheduleDescriptor::Daily(_) => ScheduleKind::Daily,
            ScheduleDescriptor::Weekly(_) => ScheduleKind::Weekly,
            ScheduleDescriptor::Monthly(_) => ScheduleKind::Monthly,
            ScheduleDescriptor::Yearly(_) => ScheduleKind::Yearly,
        }
    }
}

impl TryFrom<&Value> for ScheduleDescriptor {
    type Error = ScheduleError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        ScheduleDescriptor::from_value(Some(value))
    }
}

/// Reads the `params` object of one schedule kind.
struct ParamReader<'a> {
    kind: ScheduleKind,
    params: Option<&'a Map<String, Value>>,
}

impl<'a> ParamReader<'a> {
    fn new(kind: ScheduleKind, params: Option<&'a Value>) -> Result<Self, ScheduleError> {
        let params = match params {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(ScheduleError::TypeMismatch {
                    param: "params",
                    expected: "an object",
                })
            }
        };

        if let Some(map) = params {
            let allowed = kind.params();
            if let Some(foreign) = map.keys().find(|key| !allowed.contains(&key.as_str())) {
                return Err(ScheduleError::UnexpectedParameter {
                    param: foreign.clone(),
                    kind,
                });
            }
        }

        Ok(Self { kind, params })
    }

    /// Present, non-null value of a parameter.
    fn get(&self, param: &str) -> Option<&'a Value> {
        self.params
            .and_then(|map| map.get(param))
            .filter(|value| !value.is_null())
    }

    fn is_present(&self, param: &str) -> bool {
        match self.get(param) {
            None => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    fn missing(&self, param: &'static str) -> ScheduleError {
        ScheduleError::MissingParameter {
            param,
            kind: self.kind,
        }
    }

    /// Check presence of several parameters before any of their types.
    fn require_all(&self, params: &[&'static str]) -> Result<(), ScheduleError> {
        match params.iter().find(|param| !self.is_present(param)) {
            Some(param) => Err(self.missing(*param)),
            None => Ok(()),
        }
    }

    fn required_string(&self, param: &'static str) -> Result<&'a str, ScheduleError> {
        if !self.is_present(param) {
            return Err(self.missing(param));
        }
        match self.get(param) {
            Some(Value::String(s)) => Ok(s.as_str()),
            _ => Err(ScheduleError::TypeMismatch {
                param,
                expected: "a string",
            }),
        }
    }

    fn required_integer(&self, param: &'static str) -> Result<i64, ScheduleError> {
        self.optional_integer(param)?
            .ok_or_else(|| self.missing(param))
    }

    fn optional_integer(&self, param: &'static str) -> Result<Option<i64>, ScheduleError> {
        match self.get(param) {
            None => Ok(None),
            Some(Value::Number(number)) => {
                if let Some(int) = number.as_i64() {
                    return Ok(Some(int));
                }
                let out_of_range = ScheduleError::TypeMismatch {
                    param,
                    expected: "a whole number within the 64-bit integer range",
                };
                if number.is_u64() {
                    return Err(out_of_range);
                }
                match number.as_f64() {
                    Some(float) if float.is_finite() && float.fract() == 0.0 => {
                        // i64::MAX as f64 rounds up to 2^63, so the upper check is exclusive
                        if float >= i64::MIN as f64 && float < i64::MAX as f64 {
                            Ok(Some(float as i64))
                        } else {
                            Err(out_of_range)
                        }
                    }
                    _ => Err(ScheduleError::TypeMismatch {
                        param,
                        expected: "a whole number",
                    }),
                }
            }
            Some(_) => Err(ScheduleError::TypeMismatch {
                param,
                expected: "a number",
            }),
        }
    }
}
