//! Calendar helpers: weekday ordinals, leap years and month lengths.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day of the week as used in the day-of-week field of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Weekday names paired with their cron ordinal (`sunday` = 1).
static WEEKDAYS: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sunday),
    ("monday", Weekday::Monday),
    ("tuesday", Weekday::Tuesday),
    ("wednesday", Weekday::Wednesday),
    ("thursday", Weekday::Thursday),
    ("friday", Weekday::Friday),
    ("saturday", Weekday::Saturday),
];

impl Weekday {
    /// Look up a weekday by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        WEEKDAYS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, day)| *day)
    }

    /// Ordinal in the cron day-of-week field, 1 (Sunday) through 7 (Saturday).
    pub fn ordinal(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn as_str(&self) -> &'static str {
        WEEKDAYS[*self as usize].0
    }

    /// Comma separated list of every weekday name, for error messages.
    pub fn allowed_names() -> String {
        WEEKDAYS
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gregorian leap year test.
///
/// Years outside the range `chrono` can represent are never leap years.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` (1-12) of `year`.
///
/// Returns `None` when `month` is outside 1-12 or `year` is outside the
/// range `chrono` can represent.
///
/// ```
/// use lambda_cron_schedule::days_in_month;
///
/// assert_eq!(days_in_month(2, 2024), Some(29));
/// assert_eq!(days_in_month(2, 2023), Some(28));
/// assert_eq!(days_in_month(4, 2023), Some(30));
/// assert_eq!(days_in_month(13, 2023), None);
/// ```
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_ordinals() {
        assert_eq!(Weekday::Sunday.ordinal(), 1);
        assert_eq!(Weekday::Wednesday.ordinal(), 4);
        assert_eq!(Weekday::Saturday.ordinal(), 7);
    }

    #[test]
    fn test_weekday_case_insensitive() {
        assert_eq!(Weekday::from_name("sunday"), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_name("Sunday"), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_name("FRIDAY"), Some(Weekday::Friday));
        assert_eq!(Weekday::from_name("someday"), None);
        assert_eq!(Weekday::from_name("sun"), None);
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(
            Weekday::allowed_names(),
            "sunday, monday, tuesday, wednesday, thursday, friday, saturday"
        );
        assert_eq!(Weekday::Thursday.to_string(), "thursday");
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn test_days_in_month() {
        let long = [1, 3, 5, 7, 8, 10, 12];
        let short = [4, 6, 9, 11];
        for month in long {
            assert_eq!(days_in_month(month, 2023), Some(31));
        }
        for month in short {
            assert_eq!(days_in_month(month, 2023), Some(30));
        }
        assert_eq!(days_in_month(2, 1900), Some(28));
        assert_eq!(days_in_month(2, 2000), Some(29));
        assert_eq!(days_in_month(0, 2024), None);
        assert_eq!(days_in_month(12, 2023), Some(31));
        assert_eq!(days_in_month(2, i32::MAX), None);
        assert!(!is_leap_year(i32::MAX));
    }
}
