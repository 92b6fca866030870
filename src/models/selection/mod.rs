// Selection module
// Day-scoped and absolute availability slots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::time_of_day::TimeOfDay;

/// Shortest slot a committed selection may have, in minutes.
pub const MIN_SELECTION_MINUTES: u32 = 30;

/// A time range inside one day, owned by that day's selection engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Selection {
    /// Create a selection, validating ordering.
    ///
    /// An `end` of 00:00 is read as the end of the day.
    ///
    /// # Examples
    /// ```
    /// use available_times::models::selection::Selection;
    /// use available_times::models::time_of_day::TimeOfDay;
    ///
    /// let start = TimeOfDay::new(9, 0).unwrap();
    /// let end = TimeOfDay::new(10, 30).unwrap();
    /// let selection = Selection::new(start, end).unwrap();
    /// assert_eq!(selection.duration_minutes(), 90);
    /// ```
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, String> {
        let selection = Self {
            start,
            end,
            id: None,
        };
        selection.validate()?;
        Ok(selection)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.end_minutes() <= self.start_minutes() {
            return Err("Selection end must be after start".to_string());
        }
        Ok(())
    }

    pub fn start_minutes(&self) -> u32 {
        self.start.minutes_from_midnight()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end.as_end_minutes()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes().saturating_sub(self.start_minutes())
    }

    /// Whether `time` falls inside `[start, end)`.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        let t = time.minutes_from_midnight();
        self.start_minutes() <= t && t < self.end_minutes()
    }

    /// Whether `[start, end)` shares a positive-length stretch with this selection.
    pub fn overlaps_minutes(&self, start: u32, end: u32) -> bool {
        self.start_minutes() < end && start < self.end_minutes()
    }

    /// Identity used by delete: same start and end.
    pub fn same_span(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.start == start && self.end == end
    }
}

/// A selection pinned to absolute instants, as exchanged with the host at week level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if end <= start {
            return Err("Time span end must be after start".to_string());
        }
        Ok(Self {
            start,
            end,
            id: None,
        })
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}
