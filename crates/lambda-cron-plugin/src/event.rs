//! Schedule event descriptors attached to function definitions.

use lambda_cron_schedule::ScheduleExpression;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `schedule` trigger event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Schedule expressions; always exactly one when produced by the plugin.
    pub rate: Vec<String>,

    /// Payload passed to the function on every invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

/// A trigger event of shape `{ "schedule": { "rate": [expr], "input": payload } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub schedule: ScheduleEvent,
}

impl EventDescriptor {
    /// Wrap a translated expression and its optional payload.
    pub fn new(expression: &ScheduleExpression, input: Option<Value>) -> Self {
        Self {
            schedule: ScheduleEvent {
                rate: vec![expression.to_string()],
                input,
            },
        }
    }

    /// The schedule expression carried by this event.
    pub fn schedule_expression(&self) -> Option<&str> {
        self.schedule.rate.first().map(String::as_str)
    }

    /// Wire representation, as appended to a function's events.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
