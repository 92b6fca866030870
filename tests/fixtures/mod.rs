// Test fixtures - reusable test data
// Provides consistent configurations, instants and gestures across test files

#![allow(dead_code)]

use available_times::models::selection::{Selection, TimeSpan};
use available_times::models::settings::WidgetConfig;
use available_times::models::time_of_day::TimeOfDay;
use available_times::models::week::WeekStartDay;
use chrono::{DateTime, TimeZone, Utc};

/// Widget configurations used across tests
pub mod configs {
    use super::*;

    /// New York, Monday weeks, full day visible, 50px per hour
    pub fn new_york_monday() -> WidgetConfig {
        WidgetConfig::new("America/New_York", WeekStartDay::Monday).unwrap()
    }

    /// Berlin, Sunday weeks, touch devices
    pub fn berlin_touch() -> WidgetConfig {
        WidgetConfig::new("Europe/Berlin", WeekStartDay::Sunday)
            .unwrap()
            .with_touch_to_delete(true)
    }
}

/// Reference instants
pub mod dates {
    use super::*;
    use chrono_tz::America::New_York;

    /// Wall-clock time in New York as an instant
    pub fn new_york(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Wednesday 2024-07-10 at noon in New York
    pub fn midsummer_wednesday() -> DateTime<Utc> {
        new_york(2024, 7, 10, 12, 0)
    }

    /// Tuesday 2024-03-12, two days after the US spring-forward
    pub fn after_spring_forward() -> DateTime<Utc> {
        new_york(2024, 3, 12, 12, 0)
    }
}

pub fn tod(h: u32, m: u32) -> TimeOfDay {
    TimeOfDay::new(h, m).unwrap()
}

pub fn selection(sh: u32, sm: u32, eh: u32, em: u32) -> Selection {
    Selection::new(tod(sh, sm), tod(eh, em)).unwrap()
}

pub fn span(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeSpan {
    TimeSpan::new(start, end).unwrap()
}

/// Page y of a wall-clock time for a column at the top of the page, 50px per hour
pub fn page_y(h: u32, m: u32) -> f64 {
    (h * 60 + m) as f64 * 50.0 / 60.0
}
