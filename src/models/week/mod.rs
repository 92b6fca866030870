//! Week and day descriptors.
//!
//! A [`Week`] is produced by the week window service and is immutable once
//! built. Its boundaries sit on local midnight in the week's time zone, so a
//! week containing a DST transition is 167 or 169 hours long in absolute time
//! but always seven calendar days.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Number of days shown in a week view.
pub const DAYS_IN_WEEK: usize = 7;

/// The weekday a week starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    Sunday,
    Monday,
}

impl WeekStartDay {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStartDay::Sunday => Weekday::Sun,
            WeekStartDay::Monday => Weekday::Mon,
        }
    }

    /// Days from the week start to `weekday`, in `0..7`.
    pub fn days_until(&self, weekday: Weekday) -> u32 {
        match self {
            WeekStartDay::Sunday => weekday.num_days_from_sunday(),
            WeekStartDay::Monday => weekday.num_days_from_monday(),
        }
    }
}

impl fmt::Display for WeekStartDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStartDay::Sunday => write!(f, "sunday"),
            WeekStartDay::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStartDay {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" => Ok(WeekStartDay::Sunday),
            "monday" => Ok(WeekStartDay::Monday),
            _ => Err(ConfigurationError::InvalidWeekStart(s.to_string())),
        }
    }
}

/// One column of the week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    /// Local midnight at the start of this day.
    pub instant: DateTime<Utc>,
    pub date: NaiveDate,
    /// Full weekday name, e.g. "Monday".
    pub name: String,
    /// Short weekday name, e.g. "Mon".
    pub abbreviated: String,
    /// Whether the day accepts selections.
    pub available: bool,
}

/// Seven consecutive days starting on the configured week start.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub start: DateTime<Utc>,
    /// Start of the following week.
    pub end: DateTime<Utc>,
    pub days: Vec<Day>,
    pub time_zone: Tz,
}

impl Week {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Index of the day an instant falls in, by local calendar date.
    pub fn day_index_of(&self, instant: DateTime<Utc>) -> Option<usize> {
        let date = instant.with_timezone(&self.time_zone).date_naive();
        self.days.iter().position(|day| day.date == date)
    }

    /// Local midnight ending day `index` (the next day's start, or the week end).
    pub fn day_end(&self, index: usize) -> Option<DateTime<Utc>> {
        if index >= self.days.len() {
            return None;
        }
        Some(
            self.days
                .get(index + 1)
                .map(|next| next.instant)
                .unwrap_or(self.end),
        )
    }
}
