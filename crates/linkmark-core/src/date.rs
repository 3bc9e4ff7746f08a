//! Display formatting for remote timestamps.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{BookmarkError, Result};

/// Timestamp layout used by the notes endpoints.
pub const NOTES_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The date layout the user picked for displaying timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredDateFormat {
    /// `31/12/24, 18:30`
    #[default]
    DayMonthYearWithTime,
    /// `12/31/24, 18:30`
    MonthDayYearWithTime,
    /// `24/12/31, 18:30`
    ShortYearMonthDayWithTime,
    /// `2024-12-31, 18:30`
    YearMonthDayWithTime,
}

impl PreferredDateFormat {
    /// All formats, in the order they are offered to the user.
    pub const ALL: [PreferredDateFormat; 4] = [
        Self::DayMonthYearWithTime,
        Self::MonthDayYearWithTime,
        Self::ShortYearMonthDayWithTime,
        Self::YearMonthDayWithTime,
    ];

    /// Returns the key used to persist this format.
    pub fn key(self) -> &'static str {
        match self {
            Self::DayMonthYearWithTime => "day_month_year_with_time",
            Self::MonthDayYearWithTime => "month_day_year_with_time",
            Self::ShortYearMonthDayWithTime => "short_year_month_day_with_time",
            Self::YearMonthDayWithTime => "year_month_day_with_time",
        }
    }

    /// Resolves a persisted key, falling back to the default format.
    pub fn from_key(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        Self::ALL
            .into_iter()
            .find(|format| format.key().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::DayMonthYearWithTime => "%d/%m/%y, %H:%M",
            Self::MonthDayYearWithTime => "%m/%d/%y, %H:%M",
            Self::ShortYearMonthDayWithTime => "%y/%m/%d, %H:%M",
            Self::YearMonthDayWithTime => "%Y-%m-%d, %H:%M",
        }
    }
}

/// Converts remote timestamps into the user's display format.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormatter {
    format: PreferredDateFormat,
}

impl DateFormatter {
    /// Creates a formatter for the given display format.
    pub fn new(format: PreferredDateFormat) -> Self {
        Self { format }
    }

    /// Returns the display format in use.
    pub fn format(&self) -> PreferredDateFormat {
        self.format
    }

    /// Reformats a notes timestamp (`yyyy-MM-dd HH:mm:ss`) for display.
    pub fn notes_format_to_display(&self, input: &str) -> Result<String> {
        let parsed = NaiveDateTime::parse_from_str(input, NOTES_FORMAT).map_err(|e| {
            BookmarkError::parse_error_with_cause("note timestamp", input.to_string(), e)
        })?;

        Ok(parsed.format(self.format.pattern()).to_string())
    }
}
