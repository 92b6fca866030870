// Layout service
// Side-by-side column placement for overlapping background events

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::models::event::CalendarEvent;

/// A background event with its derived horizontal placement.
///
/// `width` and `offset` are fractions of the day column. They are recomputed
/// on every layout pass and never fed back into the event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    pub event: CalendarEvent,
    pub column: usize,
    pub columns: usize,
    pub width: f64,
    pub offset: f64,
}

impl PositionedEvent {
    fn full_width(event: CalendarEvent) -> Self {
        Self {
            event,
            column: 0,
            columns: 1,
            width: 1.0,
            offset: 0.0,
        }
    }
}

/// Events to show on the day `[day_start, day_end)`.
///
/// All-day events show on every day their range covers. Timed events show
/// when they start inside the day or end inside it.
pub fn events_for_day(
    events: &[CalendarEvent],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|event| {
            if event.all_day {
                day_start >= event.start && day_start < event.end
            } else {
                let starts_inside = event.start >= day_start && event.start < day_end;
                let ends_inside = event.end > day_start && event.end < day_end;
                starts_inside || ends_inside
            }
        })
        .cloned()
        .collect()
}

/// Place events in columns so that overlapping events sit side by side.
///
/// Events are sorted by start (ties keep input order) and the result follows
/// that order. Overlapping timed events are swept into groups; inside a group
/// each event takes the first column that is free at its start and then
/// widens over following columns that hold nothing overlapping it.
///
/// # Examples
/// ```
/// use available_times::models::event::CalendarEvent;
/// use available_times::services::layout::decorate;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let nine = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
/// let a = CalendarEvent::new("a", nine, nine + Duration::hours(1)).unwrap();
/// let b = CalendarEvent::new("b", nine, nine + Duration::hours(1)).unwrap();
/// let placed = decorate(&[a, b], chrono_tz::UTC);
/// assert_eq!(placed[1].offset, 0.5);
/// ```
pub fn decorate(events: &[CalendarEvent], tz: Tz) -> Vec<PositionedEvent> {
    let mut sorted: Vec<CalendarEvent> = events.to_vec();
    sorted.sort_by_key(|event| event.start.with_timezone(&tz));

    let mut placed: Vec<Option<PositionedEvent>> = vec![None; sorted.len()];
    let mut group: Vec<usize> = Vec::new();
    let mut group_end: Option<DateTime<Utc>> = None;

    for (index, event) in sorted.iter().enumerate() {
        if event.all_day {
            placed[index] = Some(PositionedEvent::full_width(event.clone()));
            continue;
        }
        if let Some(end) = group_end {
            if event.start >= end {
                place_group(&sorted, &group, &mut placed);
                group.clear();
                group_end = None;
            }
        }
        group.push(index);
        group_end = Some(group_end.map_or(event.end, |end| end.max(event.end)));
    }
    place_group(&sorted, &group, &mut placed);

    log::debug!("Laid out {} events", sorted.len());
    placed.into_iter().flatten().collect()
}

/// Lay out one group of transitively overlapping events.
fn place_group(
    sorted: &[CalendarEvent],
    group: &[usize],
    placed: &mut [Option<PositionedEvent>],
) {
    if group.is_empty() {
        return;
    }

    let mut columns: Vec<Vec<usize>> = Vec::new();
    let mut column_of: Vec<(usize, usize)> = Vec::with_capacity(group.len());
    for &index in group {
        let event = &sorted[index];
        let free = columns.iter().position(|column| {
            column
                .last()
                .map_or(true, |&last| sorted[last].end <= event.start)
        });
        let column = match free {
            Some(column) => column,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };
        columns[column].push(index);
        column_of.push((index, column));
    }

    let total = columns.len();
    for (index, column) in column_of {
        let event = &sorted[index];
        let span = 1 + columns[column + 1..]
            .iter()
            .take_while(|others| {
                !others
                    .iter()
                    .any(|&other| sorted[other].overlaps(event))
            })
            .count();

        placed[index] = Some(PositionedEvent {
            event: event.clone(),
            column,
            columns: total,
            width: span as f64 / total as f64,
            offset: column as f64 / total as f64,
        });
    }
}
