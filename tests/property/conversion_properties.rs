// Property-based tests for time conversion and week-relative offsets

use available_times::models::recurrence::WEEK_MINUTES;
use available_times::models::selection::TimeSpan;
use available_times::models::time_of_day::TimeOfDay;
use available_times::models::week::WeekStartDay;
use available_times::services::recurrence::{denormalize, normalize, week_offset_minutes};
use available_times::services::week::week_at;
use available_times::utils::date::{
    instant_to_local_time_of_day, pixels_to_time_of_day, time_of_day_to_pixels, DRAG_ROUND_MINUTES,
};
use chrono::{Duration, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use proptest::prelude::*;

const ZONES: [Tz; 4] = [
    chrono_tz::America::New_York,
    chrono_tz::Europe::London,
    chrono_tz::Australia::Sydney,
    chrono_tz::Asia::Kolkata,
];

fn every_day() -> std::collections::HashSet<Weekday> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .collect()
}

proptest! {
    /// Property: grid-aligned times survive a round trip through pixels
    #[test]
    fn prop_pixel_round_trip(slot in 0..48u32, pph in 20.0..120.0f64) {
        let time = TimeOfDay::from_minutes(slot * 30).unwrap();
        let px = time_of_day_to_pixels(time, pph);
        prop_assert_eq!(pixels_to_time_of_day(px, pph, DRAG_ROUND_MINUTES), time);
    }

    /// Property: week offsets are never negative and stay inside one week
    #[test]
    fn prop_offset_in_range(minutes in 0..(3 * 365 * 1440i64), zone in 0..4usize, monday in any::<bool>()) {
        let instant = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        let week_start = if monday { WeekStartDay::Monday } else { WeekStartDay::Sunday };
        let offset = week_offset_minutes(instant, ZONES[zone], week_start);
        prop_assert!(offset < WEEK_MINUTES);
    }

    /// Property: normalizing then pinning to the same week restores wall-clock times
    #[test]
    fn prop_recurrence_round_trip_keeps_time_of_day(
        day in 0..7i64,
        slot in 0..46i64,
        length in 1..3i64,
        zone in 0..4usize,
    ) {
        let tz = ZONES[zone];
        // A week in July has no DST switch in any of the zones
        let reference = Utc.with_ymd_and_hms(2024, 7, 17, 12, 0, 0).unwrap();
        let week = week_at(WeekStartDay::Monday, reference, tz, &every_day());

        let start = week.days[day as usize].instant + Duration::minutes(slot * 30);
        let span = TimeSpan::new(start, start + Duration::minutes(length * 30)).unwrap();
        let restored = denormalize(&normalize(&span, tz, WeekStartDay::Monday), &week);

        prop_assert_eq!(
            instant_to_local_time_of_day(restored.start, tz),
            instant_to_local_time_of_day(span.start, tz)
        );
        prop_assert_eq!(restored.duration(), span.duration());
    }
}
