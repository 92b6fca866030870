// Property-based tests for event layout
// Overlapping events never cover each other and always fit their column

use available_times::models::event::CalendarEvent;
use available_times::services::layout::decorate;
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

fn events() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec((0..1380i64, 15..240i64), 0..25).prop_map(|ranges| {
        let midnight = Utc.with_ymd_and_hms(2024, 7, 10, 0, 0, 0).unwrap();
        ranges
            .into_iter()
            .enumerate()
            .map(|(i, (start, length))| {
                let start = midnight + Duration::minutes(start);
                CalendarEvent::new(format!("event {}", i), start, start + Duration::minutes(length))
                    .unwrap()
            })
            .collect()
    })
}

proptest! {
    /// Property: every event fits inside the day column
    #[test]
    fn prop_placement_within_column(events in events()) {
        let placed = decorate(&events, chrono_tz::Asia::Tokyo);
        prop_assert_eq!(placed.len(), events.len());
        for p in &placed {
            prop_assert!(p.width > 0.0 && p.width <= 1.0);
            prop_assert!(p.offset >= 0.0 && p.offset < 1.0);
            prop_assert!(p.offset + p.width <= 1.0 + 1e-9);
        }
    }

    /// Property: overlapping events get disjoint horizontal extents
    #[test]
    fn prop_overlapping_events_do_not_collide(events in events()) {
        let placed = decorate(&events, chrono_tz::Asia::Tokyo);
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                if a.event.overlaps(&b.event) {
                    let disjoint = a.offset + a.width <= b.offset + 1e-9
                        || b.offset + b.width <= a.offset + 1e-9;
                    prop_assert!(disjoint, "{:?} collides with {:?}", a, b);
                }
            }
        }
    }

    /// Property: output is sorted by start
    #[test]
    fn prop_output_sorted(events in events()) {
        let placed = decorate(&events, chrono_tz::Asia::Tokyo);
        for pair in placed.windows(2) {
            prop_assert!(pair[0].event.start <= pair[1].event.start);
        }
    }
}
