//! Wall-clock time of day, independent of any date.
//!
//! Day-scoped selections are expressed in `TimeOfDay` values. The value range
//! is 00:00 through 23:59; there is no 24:00. When used as the *end* of a
//! range, 00:00 means the end of the day, see [`TimeOfDay::as_end_minutes`].

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock hour and minute (00:00 to 23:59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };
    /// Internal marker for a range that runs to the end of the day.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay { minutes: 23 * 60 + 59 };
    /// What an end-of-day range shows once committed.
    pub const DISPLAY_END_OF_DAY: TimeOfDay = TimeOfDay { minutes: 23 * 60 + 45 };

    /// Create a time of day, returning `None` for out-of-range components.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: (hour * 60 + minute) as u16,
            })
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self {
            minutes: minutes as u16,
        })
    }

    /// Build from a possibly out-of-range minute count, pinning it into the day.
    /// Anything at or past 24:00 becomes 23:59.
    pub fn from_minutes_clamped(minutes: i64) -> Self {
        let clamped = minutes.clamp(0, (MINUTES_PER_DAY - 1) as i64);
        Self {
            minutes: clamped as u16,
        }
    }

    pub fn hour(&self) -> u32 {
        self.minutes as u32 / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes as u32 % 60
    }

    pub fn minutes_from_midnight(&self) -> u32 {
        self.minutes as u32
    }

    /// Minutes from midnight when this value closes a range: 00:00 counts as 24:00.
    pub fn as_end_minutes(&self) -> u32 {
        if self.minutes == 0 {
            MINUTES_PER_DAY
        } else {
            self.minutes as u32
        }
    }

    /// True for the two spellings of "runs to midnight" that get collapsed on commit.
    pub fn is_end_of_day(&self) -> bool {
        *self == Self::END_OF_DAY || *self == Self::MIDNIGHT
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::default())
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Accepts `H:mm` and `HH:mm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("Invalid time of day '{}': expected H:mm", s))?;
        let hour: u32 = hour
            .parse()
            .map_err(|_| format!("Invalid hour in '{}'", s))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| format!("Invalid minute in '{}'", s))?;
        Self::new(hour, minute).ok_or_else(|| format!("Time of day out of range: '{}'", s))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
