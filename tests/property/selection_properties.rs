// Property-based tests for the selection engine
// Any sequence of pointer input leaves a valid, non-overlapping day

use available_times::models::selection::{Selection, MIN_SELECTION_MINUTES};
use available_times::models::settings::WidgetConfig;
use available_times::models::week::WeekStartDay;
use available_times::services::selection::{ElementGeometry, PointerSample, SelectionEngine};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Input {
    Down(f64),
    Move(f64),
    Release,
    Cancel,
    BeginMove(usize, f64),
    BeginResize(usize, f64),
    Delete(usize, i64),
}

fn input() -> impl Strategy<Value = Input> {
    let y = 0.0..1250.0f64;
    prop_oneof![
        y.clone().prop_map(Input::Down),
        y.clone().prop_map(Input::Move),
        Just(Input::Release),
        Just(Input::Cancel),
        (0..4usize, y.clone()).prop_map(|(i, y)| Input::BeginMove(i, y)),
        (0..4usize, y).prop_map(|(i, y)| Input::BeginResize(i, y)),
        (0..4usize, 0..2000i64).prop_map(|(i, ms)| Input::Delete(i, ms)),
    ]
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 10, 12, 0, 0).unwrap()
}

fn assert_valid_day(selections: &[Selection]) -> Result<(), TestCaseError> {
    for selection in selections {
        prop_assert!(selection.duration_minutes() >= MIN_SELECTION_MINUTES, "{:?}", selection);
    }
    for pair in selections.windows(2) {
        prop_assert!(pair[0].start <= pair[1].start, "unsorted: {:?}", pair);
        prop_assert!(
            pair[0].end_minutes() <= pair[1].start_minutes(),
            "overlap: {:?}",
            pair
        );
    }
    Ok(())
}

proptest! {
    /// Property: committed lists never overlap and never hold short slots
    #[test]
    fn prop_committed_day_stays_valid(inputs in prop::collection::vec(input(), 1..60)) {
        let config = WidgetConfig::new("America/New_York", WeekStartDay::Sunday).unwrap();
        let mut day = SelectionEngine::new(&config, true, vec![]);
        let geometry = ElementGeometry::new(0.0);

        for (step, input) in inputs.into_iter().enumerate() {
            let at = base() + Duration::milliseconds(step as i64 * 100);
            let committed = match input {
                Input::Down(y) => {
                    day.pointer_down(PointerSample::new(y, at), geometry);
                    None
                }
                Input::Move(y) => {
                    day.pointer_move(PointerSample::new(y, at), geometry);
                    None
                }
                Input::Release => day.release(),
                Input::Cancel => {
                    day.cancel();
                    None
                }
                Input::BeginMove(i, y) => {
                    if let Some(target) = day.selections().get(i).cloned() {
                        day.begin_move(&target, PointerSample::new(y, at), geometry);
                    }
                    None
                }
                Input::BeginResize(i, y) => {
                    if let Some(target) = day.selections().get(i).cloned() {
                        day.begin_resize(&target, PointerSample::new(y, at), geometry);
                    }
                    None
                }
                Input::Delete(i, ms) => day
                    .selections()
                    .get(i)
                    .cloned()
                    .and_then(|target| day.delete(&target, at + Duration::milliseconds(ms))),
            };

            if let Some(list) = committed {
                assert_valid_day(&list)?;
                prop_assert_eq!(&list, &day.committed());
            }
            assert_valid_day(&day.committed())?;
        }
    }

    /// Property: a gesture that never reaches release leaves committed state alone
    #[test]
    fn prop_unreleased_gesture_changes_nothing(
        start in 0.0..1150.0f64,
        moves in prop::collection::vec(0.0..1250.0f64, 0..10),
    ) {
        let config = WidgetConfig::new("Europe/Paris", WeekStartDay::Monday).unwrap();
        let existing = Selection::new(
            "12:00".parse().unwrap(),
            "13:30".parse().unwrap(),
        ).unwrap();
        let mut day = SelectionEngine::new(&config, true, vec![existing.clone()]);
        let geometry = ElementGeometry::new(0.0);

        day.pointer_down(PointerSample::new(start, base()), geometry);
        for y in moves {
            day.pointer_move(PointerSample::new(y, base()), geometry);
        }
        prop_assert_eq!(day.committed(), vec![existing]);
    }
}
