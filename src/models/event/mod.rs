// Event module
// Background calendar event shown behind the selection grid

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A read-only background event. Layout data is never stored here; see
/// `services::layout` for the derived column placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Option<i64>,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
}

impl CalendarEvent {
    /// Create a timed event.
    ///
    /// # Arguments
    /// * `title` - Display title (may be empty for anonymous busy blocks)
    /// * `start` - Event start
    /// * `end` - Event end, strictly after `start`
    ///
    /// # Examples
    /// ```
    /// use available_times::models::event::CalendarEvent;
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
    /// let event = CalendarEvent::new("Standup", start, start + Duration::minutes(15)).unwrap();
    /// assert!(!event.all_day);
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, String> {
        let event = Self {
            id: None,
            title: title.into(),
            start,
            end,
            all_day: false,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::new()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.end <= self.start {
            return Err("Event end time must be after start time".to_string());
        }
        Ok(())
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Open-interval overlap with another event.
    pub fn overlaps(&self, other: &CalendarEvent) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Builder for events with optional fields
#[derive(Default)]
pub struct CalendarEventBuilder {
    id: Option<i64>,
    title: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    all_day: bool,
}

impl CalendarEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn build(self) -> Result<CalendarEvent, String> {
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.ok_or("Event end time is required")?;

        let event = CalendarEvent {
            id: self.id,
            title: self.title.unwrap_or_default(),
            start,
            end,
            all_day: self.all_day,
        };

        event.validate()?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_event_invalid_times() {
        let start = sample_start();
        let result = CalendarEvent::new("Meeting", start, start - Duration::hours(1));
        assert_eq!(
            result.unwrap_err(),
            "Event end time must be after start time"
        );
    }

    #[test]
    fn test_new_event_equal_times() {
        let start = sample_start();
        assert!(CalendarEvent::new("Meeting", start, start).is_err());
    }

    #[test]
    fn test_builder_all_day() {
        let start = sample_start();
        let event = CalendarEvent::builder()
            .id(7)
            .title("Holiday")
            .start(start)
            .end(start + Duration::days(1))
            .all_day(true)
            .build()
            .unwrap();

        assert_eq!(event.id, Some(7));
        assert!(event.all_day);
        assert_eq!(event.duration(), Duration::days(1));
    }

    #[test]
    fn test_builder_missing_start() {
        let result = CalendarEvent::builder().end(sample_start()).build();
        assert_eq!(result.unwrap_err(), "Event start time is required");
    }

    #[test]
    fn test_builder_missing_end() {
        let result = CalendarEvent::builder().start(sample_start()).build();
        assert_eq!(result.unwrap_err(), "Event end time is required");
    }

    #[test]
    fn test_overlap_is_open_interval() {
        let start = sample_start();
        let a = CalendarEvent::new("A", start, start + Duration::hours(1)).unwrap();
        let b = CalendarEvent::new("B", start + Duration::hours(1), start + Duration::hours(2))
            .unwrap();
        let c = CalendarEvent::new("C", start + Duration::minutes(30), start + Duration::hours(2))
            .unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }
}
