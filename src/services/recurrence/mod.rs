//! Conversion between absolute selections and week-relative offsets.
//!
//! A recurring selection only remembers "how many wall-clock minutes after
//! the start of the week". Offsets are measured inside a fixed anchor week
//! of naive dates, which has no DST transitions, so the stored value depends
//! only on weekday and wall-clock time, never on which real week the
//! selection was made in.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::models::recurrence::{RecurringSelection, WEEK_MINUTES};
use crate::models::selection::TimeSpan;
use crate::models::week::{Week, WeekStartDay};
use crate::utils::date::resolve_local;

/// 2017-01-01 was a Sunday.
fn anchor_sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or_default()
}

/// Place a local wall-clock reading into the anchor week, keeping weekday and time.
fn into_anchor_week(local: NaiveDateTime) -> NaiveDateTime {
    let days_from_sunday = local.weekday().num_days_from_sunday() as i64;
    (anchor_sunday() + Duration::days(days_from_sunday)).and_time(local.time())
}

fn anchor_week_start(week_start: WeekStartDay) -> NaiveDateTime {
    let offset = match week_start {
        WeekStartDay::Sunday => 0,
        WeekStartDay::Monday => 1,
    };
    (anchor_sunday() + Duration::days(offset)).and_time(chrono::NaiveTime::default())
}

/// Minutes from the configured week start to the wall-clock reading of
/// `instant` in `tz`, in `[0, WEEK_MINUTES)`.
pub fn week_offset_minutes(instant: DateTime<Utc>, tz: Tz, week_start: WeekStartDay) -> u32 {
    let local = instant.with_timezone(&tz).naive_local();
    let mut offset = (into_anchor_week(local) - anchor_week_start(week_start)).num_minutes();
    if offset < 0 {
        // the weekday comes before the configured start: it belongs at the end of the week
        offset += WEEK_MINUTES as i64;
    }
    offset as u32
}

/// Convert an absolute selection to its week-relative form.
pub fn normalize(span: &TimeSpan, tz: Tz, week_start: WeekStartDay) -> RecurringSelection {
    let start_minutes = week_offset_minutes(span.start, tz, week_start);
    let local_start = span.start.with_timezone(&tz).naive_local();
    let local_end = span.end.with_timezone(&tz).naive_local();
    let length = (local_end - local_start).num_minutes().max(0) as u32;

    RecurringSelection {
        start_minutes,
        end_minutes: start_minutes + length,
    }
}

/// Pin a recurring selection onto a concrete week.
///
/// Offsets are added in local wall-clock terms from the week's first day, so
/// a slot keeps its time of day even in a week with a DST switch.
pub fn denormalize(recurring: &RecurringSelection, week: &Week) -> TimeSpan {
    let tz = week.time_zone;
    let first_day = week
        .days
        .first()
        .map(|day| day.date)
        .unwrap_or_else(|| week.start.with_timezone(&tz).date_naive());
    let base = first_day.and_time(chrono::NaiveTime::default());

    let start = resolve_local(base + Duration::minutes(recurring.start_minutes as i64), tz);
    let end = resolve_local(base + Duration::minutes(recurring.end_minutes as i64), tz);

    TimeSpan {
        start,
        end,
        id: None,
    }
}

/// One-time conversion pass used when switching into recurring mode.
pub fn to_recurring(spans: &[TimeSpan], tz: Tz, week_start: WeekStartDay) -> Vec<RecurringSelection> {
    let mut recurring: Vec<RecurringSelection> = spans
        .iter()
        .map(|span| normalize(span, tz, week_start))
        .collect();
    recurring.sort_by_key(|slot| (slot.start_minutes, slot.end_minutes));
    recurring
}

/// One-time conversion pass used when switching back to absolute mode.
pub fn to_absolute(recurring: &[RecurringSelection], week: &Week) -> Vec<TimeSpan> {
    recurring
        .iter()
        .map(|slot| denormalize(slot, week))
        .collect()
}
