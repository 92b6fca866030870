// Date utility functions
// Pixel <-> time-of-day mapping and time-zone aware local time helpers

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::time_of_day::TimeOfDay;

mod format;

pub use format::{format_time, format_time_span, hour_labels};

/// Grid used when a new slot is created by pressing on an empty area.
pub const CREATE_ROUND_MINUTES: u32 = 60;
/// Grid used while moving or resizing an existing slot.
pub const DRAG_ROUND_MINUTES: u32 = 30;

/// How far past a DST gap we look for the first valid local time.
const GAP_SEARCH_STEP_MINUTES: i64 = 15;
const GAP_SEARCH_STEPS: i64 = 48;

/// Snap a pixel offset down onto a `round_minutes` grid.
pub fn snap_to_grid(px: f64, pixels_per_hour: f64, round_minutes: u32) -> f64 {
    let step = (round_minutes as f64 / 60.0) * pixels_per_hour;
    (px / step).floor() * step
}

/// Minutes since midnight for a pixel offset: whole hours are floored, the
/// remainder is rounded to the nearest multiple of `round_minutes`.
///
/// The result is not clamped and may reach or pass 24:00.
pub fn pixels_to_minutes(px: f64, pixels_per_hour: f64, round_minutes: u32) -> i64 {
    let hours = (px / pixels_per_hour).floor();
    let remainder = px - hours * pixels_per_hour;
    let remainder_minutes = remainder / pixels_per_hour * 60.0;
    let round = round_minutes as f64;
    let minutes = (remainder_minutes / round).round() * round;
    hours as i64 * 60 + minutes as i64
}

/// Time of day at a pixel offset; positions at or past 24:00 become 23:59.
pub fn pixels_to_time_of_day(px: f64, pixels_per_hour: f64, round_minutes: u32) -> TimeOfDay {
    TimeOfDay::from_minutes_clamped(pixels_to_minutes(px, pixels_per_hour, round_minutes))
}

pub fn minutes_to_pixels(minutes: u32, pixels_per_hour: f64) -> f64 {
    minutes as f64 * pixels_per_hour / 60.0
}

pub fn time_of_day_to_pixels(time: TimeOfDay, pixels_per_hour: f64) -> f64 {
    minutes_to_pixels(time.minutes_from_midnight(), pixels_per_hour)
}

/// Wall-clock time of an instant in `tz`, truncated to the minute.
pub fn instant_to_local_time_of_day(instant: DateTime<Utc>, tz: Tz) -> TimeOfDay {
    TimeOfDay::from_naive_time(instant.with_timezone(&tz).time())
}

/// The instant at which the local wall clock in `tz` reads `time` on `date`.
pub fn local_time_of_day_to_instant(date: NaiveDate, time: TimeOfDay, tz: Tz) -> DateTime<Utc> {
    resolve_local(date.and_time(time.to_naive_time()), tz)
}

/// Map a local wall-clock reading to an instant.
///
/// Ambiguous readings (clocks going back) take the earlier instant. Readings
/// inside a DST gap move forward to the first wall-clock time that exists.
pub fn resolve_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            for step in 1..=GAP_SEARCH_STEPS {
                let candidate = naive + Duration::minutes(step * GAP_SEARCH_STEP_MINUTES);
                if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            log::warn!("No valid local time near {} in {}, reading it as UTC", naive, tz);
            Utc.from_utc_datetime(&naive)
        }
    }
}

/// Start of `date` in `tz` (or the first valid instant of that date).
pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    resolve_local(date.and_time(NaiveTime::default()), tz)
}

/// Noon of `date` in `tz`. Noon is never inside a DST transition, which makes
/// it a safe anchor for day arithmetic.
pub fn local_noon(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::default());
    resolve_local(date.and_time(noon), tz)
}

pub fn is_same_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    a.with_timezone(&tz).date_naive() == b.with_timezone(&tz).date_naive()
}
