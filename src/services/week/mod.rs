//! Week window computation.
//!
//! Finds the seven days around a reference instant, honoring the configured
//! week start and time zone. Day arithmetic runs on naive local calendar
//! dates, so a DST switch at midnight can never shift which date a day
//! belongs to; each date is then pinned to its local midnight. Stepping to a
//! neighbouring week goes through local noon of the boundary date.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use std::collections::HashSet;

use crate::models::settings::WidgetConfig;
use crate::models::week::{Day, Week, WeekStartDay, DAYS_IN_WEEK};
use crate::utils::date::{local_midnight, local_noon};

/// The week containing `reference` in `tz`.
pub fn week_at(
    week_start: WeekStartDay,
    reference: DateTime<Utc>,
    tz: Tz,
    available_days: &HashSet<Weekday>,
) -> Week {
    let mut date = reference.with_timezone(&tz).date_naive();
    if week_start == WeekStartDay::Monday && date.weekday() == Weekday::Sun {
        // Sunday closes a Monday week rather than opening the next one
        date = date - Duration::days(1);
    }

    let start_date = date - Duration::days(week_start.days_until(date.weekday()) as i64);

    let days = (0..DAYS_IN_WEEK as i64)
        .map(|offset| build_day(start_date + Duration::days(offset), tz, available_days))
        .collect();

    let week = Week {
        start: local_midnight(start_date, tz),
        end: local_midnight(start_date + Duration::days(DAYS_IN_WEEK as i64), tz),
        days,
        time_zone: tz,
    };
    log::debug!(
        "Week window for {}: {} .. {} ({})",
        reference,
        week.start,
        week.end,
        tz
    );
    week
}

/// The week containing `reference`, using the widget's zone, week start and
/// available days.
pub fn week_for(config: &WidgetConfig, reference: DateTime<Utc>) -> Week {
    week_at(
        config.week_start,
        reference,
        config.time_zone,
        &config.available_days,
    )
}

/// The week after `week`.
pub fn next_week(week: &Week, week_start: WeekStartDay, available_days: &HashSet<Weekday>) -> Week {
    let noon_after = local_noon(
        week.end.with_timezone(&week.time_zone).date_naive(),
        week.time_zone,
    );
    week_at(week_start, noon_after, week.time_zone, available_days)
}

/// The week before `week`.
pub fn previous_week(
    week: &Week,
    week_start: WeekStartDay,
    available_days: &HashSet<Weekday>,
) -> Week {
    let first = week.start.with_timezone(&week.time_zone).date_naive();
    let noon_before = local_noon(first - Duration::days(1), week.time_zone);
    week_at(week_start, noon_before, week.time_zone, available_days)
}

fn build_day(date: NaiveDate, tz: Tz, available_days: &HashSet<Weekday>) -> Day {
    Day {
        instant: local_midnight(date, tz),
        date,
        name: date.format("%A").to_string(),
        abbreviated: date.format("%a").to_string(),
        available: available_days.contains(&date.weekday()),
    }
}
