//! Translator configuration.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for the schedule translator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Reference year for the February bound of yearly schedules.
    /// Defaults to the current UTC year at translation time.
    #[serde(default)]
    pub year: Option<i32>,
}

impl TranslatorConfig {
    /// Configuration pinned to a fixed reference year.
    pub fn with_year(year: i32) -> Self {
        Self { year: Some(year) }
    }

    /// The year used for leap-year evaluation.
    pub fn reference_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}
