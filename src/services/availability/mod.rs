//! Week-level availability coordinator.
//!
//! Owns one [`SelectionEngine`] per day of the current week, routes pointer
//! input to the right day and, whenever a day commits, hands the whole week's
//! selections to a [`SelectionSink`]. In recurring mode the week's selections
//! are reported as week-relative offsets instead of absolute spans.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use crate::models::event::CalendarEvent;
use crate::models::recurrence::RecurringSelection;
use crate::models::selection::{Selection, TimeSpan};
use crate::models::settings::WidgetConfig;
use crate::models::time_of_day::TimeOfDay;
use crate::models::week::Week;
use crate::services::layout::{decorate, events_for_day, PositionedEvent};
use crate::services::recurrence::{denormalize, to_recurring};
use crate::services::selection::{ElementGeometry, PointerSample, SelectionEngine, TouchSample};
use crate::services::week::week_for;
use crate::utils::date::{instant_to_local_time_of_day, local_midnight, local_time_of_day_to_instant};

/// The week's selections in the mode the widget is in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "selections", rename_all = "lowercase")]
pub enum WeekSelections {
    Absolute(Vec<TimeSpan>),
    Recurring(Vec<RecurringSelection>),
}

impl WeekSelections {
    pub fn is_recurring(&self) -> bool {
        matches!(self, WeekSelections::Recurring(_))
    }

    pub fn len(&self) -> usize {
        match self {
            WeekSelections::Absolute(spans) => spans.len(),
            WeekSelections::Recurring(slots) => slots.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receives the complete week list after every commit.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionSink {
    fn selections_changed(&mut self, selections: WeekSelections);
}

pub struct AvailabilityWeek<S: SelectionSink> {
    config: WidgetConfig,
    week: Week,
    recurring: bool,
    days: Vec<SelectionEngine>,
    events: Vec<CalendarEvent>,
    sink: S,
}

impl<S: SelectionSink> AvailabilityWeek<S> {
    /// Build the week containing `reference` and distribute `initial` over
    /// its days. Selections outside the week are dropped with a warning.
    pub fn new(
        config: WidgetConfig,
        reference: DateTime<Utc>,
        initial: WeekSelections,
        sink: S,
    ) -> Self {
        let week = week_for(&config, reference);
        let recurring = initial.is_recurring();
        let spans = match initial {
            WeekSelections::Absolute(spans) => spans,
            WeekSelections::Recurring(slots) => slots
                .iter()
                .map(|slot| denormalize(slot, &week))
                .collect(),
        };

        let mut buckets: Vec<Vec<Selection>> = vec![Vec::new(); week.days.len()];
        for span in &spans {
            match bucket_span(span, &week) {
                Some((index, selection)) => buckets[index].push(selection),
                None => log::warn!(
                    "Dropping selection {} .. {} outside the week of {}",
                    span.start,
                    span.end,
                    week.start
                ),
            }
        }

        let days = week
            .days
            .iter()
            .zip(buckets)
            .map(|(day, selections)| {
                SelectionEngine::new(&config, config.is_available(day.date.weekday()), selections)
            })
            .collect();

        log::info!(
            "Availability week {} .. {} ready ({} selections, recurring={})",
            week.start,
            week.end,
            spans.len(),
            recurring
        );

        Self {
            config,
            week,
            recurring,
            days,
            events: Vec::new(),
            sink,
        }
    }

    pub fn week(&self) -> &Week {
        &self.week
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring
    }

    pub fn day(&self, index: usize) -> Option<&SelectionEngine> {
        self.days.get(index)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Committed selections of the whole week, in day order.
    pub fn selections(&self) -> WeekSelections {
        let spans: Vec<TimeSpan> = self
            .days
            .iter()
            .enumerate()
            .flat_map(|(index, engine)| {
                engine
                    .committed()
                    .into_iter()
                    .map(move |selection| (index, selection))
            })
            .map(|(index, selection)| self.to_span(index, &selection))
            .collect();

        if self.recurring {
            WeekSelections::Recurring(to_recurring(
                &spans,
                self.config.time_zone,
                self.config.week_start,
            ))
        } else {
            WeekSelections::Absolute(spans)
        }
    }

    pub fn pointer_down(&mut self, day: usize, sample: PointerSample, geometry: ElementGeometry) -> bool {
        self.days
            .get_mut(day)
            .map_or(false, |engine| engine.pointer_down(sample, geometry))
    }

    pub fn begin_resize(
        &mut self,
        day: usize,
        selection: &Selection,
        sample: PointerSample,
        geometry: ElementGeometry,
    ) -> bool {
        self.days
            .get_mut(day)
            .map_or(false, |engine| engine.begin_resize(selection, sample, geometry))
    }

    pub fn begin_move(
        &mut self,
        day: usize,
        selection: &Selection,
        sample: PointerSample,
        geometry: ElementGeometry,
    ) -> bool {
        self.days
            .get_mut(day)
            .map_or(false, |engine| engine.begin_move(selection, sample, geometry))
    }

    pub fn pointer_move(&mut self, day: usize, sample: PointerSample, geometry: ElementGeometry) {
        if let Some(engine) = self.days.get_mut(day) {
            engine.pointer_move(sample, geometry);
        }
    }

    /// Release on `day`; the sink hears about it only if a gesture committed.
    pub fn release(&mut self, day: usize) -> bool {
        let committed = self.days.get_mut(day).and_then(SelectionEngine::release);
        self.notify_if(committed.is_some())
    }

    pub fn cancel(&mut self, day: usize) {
        if let Some(engine) = self.days.get_mut(day) {
            engine.cancel();
        }
    }

    pub fn delete(&mut self, day: usize, selection: &Selection, at: DateTime<Utc>) -> bool {
        let committed = self
            .days
            .get_mut(day)
            .and_then(|engine| engine.delete(selection, at));
        self.notify_if(committed.is_some())
    }

    pub fn tap_selection(&mut self, day: usize, selection: &Selection, at: DateTime<Utc>) -> bool {
        let committed = self
            .days
            .get_mut(day)
            .and_then(|engine| engine.tap_selection(selection, at));
        self.notify_if(committed.is_some())
    }

    pub fn touch_start(&mut self, day: usize, sample: TouchSample, geometry: ElementGeometry) {
        if let Some(engine) = self.days.get_mut(day) {
            engine.touch_start(sample, geometry);
        }
    }

    pub fn touch_move(&mut self, day: usize, sample: TouchSample) {
        if let Some(engine) = self.days.get_mut(day) {
            engine.touch_move(sample);
        }
    }

    pub fn touch_end(&mut self, day: usize) -> bool {
        let committed = self.days.get_mut(day).and_then(SelectionEngine::touch_end);
        self.notify_if(committed.is_some())
    }

    /// Switch between absolute and recurring reporting. The converted list
    /// is emitted once; asking for the current mode does nothing.
    pub fn set_recurring(&mut self, recurring: bool) {
        if self.recurring == recurring {
            return;
        }
        self.recurring = recurring;
        log::info!("Switched to {} selections", if recurring { "recurring" } else { "absolute" });
        self.notify();
    }

    /// Empty every day and notify the sink once.
    pub fn clear_all(&mut self) {
        for engine in &mut self.days {
            engine.clear();
        }
        self.notify();
    }

    /// Replace the background events shown behind the selections.
    pub fn set_events(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }

    /// Background events of `day` with their column placement.
    pub fn layout_events(&self, day: usize) -> Vec<PositionedEvent> {
        let (Some(start), Some(end)) = (
            self.week.days.get(day).map(|d| d.instant),
            self.week.day_end(day),
        ) else {
            return Vec::new();
        };
        decorate(&events_for_day(&self.events, start, end), self.config.time_zone)
    }

    fn notify_if(&mut self, committed: bool) -> bool {
        if committed {
            self.notify();
        }
        committed
    }

    fn notify(&mut self) {
        let selections = self.selections();
        log::debug!("Notifying sink with {} selections", selections.len());
        self.sink.selections_changed(selections);
    }

    /// Absolute span of a day-scoped selection. A 00:00 end closes the day.
    fn to_span(&self, index: usize, selection: &Selection) -> TimeSpan {
        let tz = self.config.time_zone;
        let date = self.week.days[index].date;
        let start = local_time_of_day_to_instant(date, selection.start, tz);
        let end = if selection.end == TimeOfDay::MIDNIGHT {
            local_midnight(date + Duration::days(1), tz)
        } else {
            local_time_of_day_to_instant(date, selection.end, tz)
        };
        TimeSpan {
            start,
            end,
            id: selection.id.clone(),
        }
    }
}

/// Day index and day-scoped selection for an absolute span. Spans running
/// past the end of their day are cut at midnight.
fn bucket_span(span: &TimeSpan, week: &Week) -> Option<(usize, Selection)> {
    let index = week.day_index_of(span.start)?;
    let day_end = week.day_end(index)?;
    let tz = week.time_zone;
    let end = if span.end >= day_end {
        TimeOfDay::MIDNIGHT
    } else {
        instant_to_local_time_of_day(span.end, tz)
    };
    Some((
        index,
        Selection {
            start: instant_to_local_time_of_day(span.start, tz),
            end,
            id: span.id.clone(),
        },
    ))
}
