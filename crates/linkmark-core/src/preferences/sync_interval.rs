//! Periodic sync cadence.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// How often bookmarks are synchronized in the background.
///
/// The set is closed: every stored value resolves to exactly one variant,
/// and anything unrecognized resolves to [`SyncInterval::Off`].
///
/// # Example
///
/// ```
/// use linkmark_core::SyncInterval;
///
/// let interval = SyncInterval::resolve(Some("every_12_hours"));
/// assert_eq!(interval, SyncInterval::Every12Hours);
/// assert_eq!(interval.hours(), 12);
///
/// assert_eq!(SyncInterval::resolve(Some("hourly")), SyncInterval::Off);
/// assert_eq!(SyncInterval::resolve(None).hours(), -1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SyncInterval {
    /// Background sync is disabled.
    #[default]
    Off,
    Every6Hours,
    Every12Hours,
    Every24Hours,
}

impl SyncInterval {
    /// Sentinel hour count reported by [`SyncInterval::Off`].
    pub const DISABLED_HOURS: i64 = -1;

    /// All variants, in the order they are offered to the user.
    pub const ALL: [SyncInterval; 4] = [
        Self::Off,
        Self::Every6Hours,
        Self::Every12Hours,
        Self::Every24Hours,
    ];

    /// Returns the period in hours, or `-1` when sync is off.
    pub fn hours(self) -> i64 {
        match self {
            Self::Off => Self::DISABLED_HOURS,
            Self::Every6Hours => 6,
            Self::Every12Hours => 12,
            Self::Every24Hours => 24,
        }
    }

    /// Returns the key used to persist this interval.
    pub fn key(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Every6Hours => "every_6_hours",
            Self::Every12Hours => "every_12_hours",
            Self::Every24Hours => "every_24_hours",
        }
    }

    /// Resolves a stored preference value.
    ///
    /// Accepts the persisted key (case and surrounding whitespace ignored)
    /// or a bare hour count. Missing and unrecognized values are `Off`.
    pub fn resolve(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim) else {
            return Self::Off;
        };

        if let Some(interval) = Self::ALL
            .into_iter()
            .find(|interval| interval.key().eq_ignore_ascii_case(value))
        {
            return interval;
        }

        value.parse::<i64>().map(Self::from_hours).unwrap_or(Self::Off)
    }

    /// Maps an hour count to its variant. Counts without a variant are `Off`.
    pub fn from_hours(hours: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|interval| interval.hours() == hours)
            .unwrap_or(Self::Off)
    }

    /// Returns true unless this is `Off`.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Returns the wake period, or `None` when sync is off.
    pub fn period(self) -> Option<Duration> {
        u64::try_from(self.hours())
            .ok()
            .map(|hours| Duration::from_secs(hours * 3600))
    }

    /// Returns when the next run is due after a run at `last_run`.
    ///
    /// `None` means nothing should be scheduled.
    pub fn next_run_after(self, last_run: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Off => None,
            _ => last_run.checked_add_signed(TimeDelta::hours(self.hours())),
        }
    }
}

impl fmt::Display for SyncInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<&str> for SyncInterval {
    fn from(value: &str) -> Self {
        Self::resolve(Some(value))
    }
}

impl From<String> for SyncInterval {
    fn from(value: String) -> Self {
        Self::resolve(Some(&value))
    }
}

impl From<SyncInterval> for String {
    fn from(interval: SyncInterval) -> Self {
        interval.key().to_string()
    }
}
