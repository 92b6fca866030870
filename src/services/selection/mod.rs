//! Per-day selection engine.
//!
//! Owns one day's list of selections and turns pointer samples into edits:
//! press on empty space creates a slot and keeps stretching its end, the
//! bottom handle resizes, dragging the body moves it. Edits that would break
//! the day's invariants (no overlap, at least 30 minutes, inside the day) are
//! dropped without touching state. A gesture's edits only become visible to
//! the outside on release, which returns the complete list once.

use chrono::{DateTime, Duration, Utc};

use crate::models::selection::{Selection, MIN_SELECTION_MINUTES};
use crate::models::settings::{HourLimits, WidgetConfig};
use crate::models::time_of_day::{TimeOfDay, MINUTES_PER_DAY};
use crate::utils::date::{
    minutes_to_pixels, pixels_to_minutes, snap_to_grid, time_of_day_to_pixels,
    CREATE_ROUND_MINUTES, DRAG_ROUND_MINUTES,
};

mod gesture;
mod overlap;
mod pointer;

pub use gesture::{EdgeDrag, Gesture, MoveDrag};
pub use overlap::{has_overlap, nearest_start_within};
pub use pointer::{ElementGeometry, PointerSample, TouchSample, TAP_SLOP_PX};

use pointer::TouchTracker;

/// A delete arriving this soon after the slot was created is ignored: it is
/// the tail of the same tap that created it.
pub const DELETE_GUARD_MS: i64 = 500;

/// Minimum length of a freshly created slot until its end is dragged past it.
const CREATE_MIN_MINUTES: u32 = 60;

/// Gap left under read-only slots so stacked slots stay distinguishable.
const FROZEN_BOTTOM_GAP_MINUTES: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    selection: Selection,
    created_at: Option<DateTime<Utc>>,
}

/// Vertical placement of a slot within the day column, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub top: f64,
    pub height: f64,
}

pub struct SelectionEngine {
    pixels_per_hour: f64,
    limits: HourLimits,
    touch_to_delete: bool,
    available: bool,
    slots: Vec<Slot>,
    committed: Vec<Slot>,
    gesture: Gesture,
    touch: Option<TouchTracker>,
}

impl SelectionEngine {
    /// Create an engine for one day.
    ///
    /// Initial selections that are inverted, shorter than 30 minutes or
    /// collide with an earlier one are dropped with a warning so the engine always starts from a valid list.
    pub fn new(config: &WidgetConfig, available: bool, initial: Vec<Selection>) -> Self {
        let mut slots: Vec<Slot> = Vec::with_capacity(initial.len());
        for selection in initial {
            if let Err(err) = selection.validate() {
                log::warn!("Dropping initial selection {:?}: {}", selection, err);
                continue;
            }
            if selection.duration_minutes() < MIN_SELECTION_MINUTES {
                log::warn!(
                    "Dropping initial selection {:?}: shorter than {} minutes",
                    selection,
                    MIN_SELECTION_MINUTES
                );
                continue;
            }
            let collides = has_overlap(
                slots.iter().map(|slot| &slot.selection),
                selection.start_minutes(),
                selection.end_minutes(),
                None,
            );
            if collides {
                log::warn!("Dropping overlapping initial selection {:?}", selection);
                continue;
            }
            slots.push(Slot {
                selection,
                created_at: None,
            });
        }
        slots.sort_by_key(|slot| slot.selection.start);

        Self {
            pixels_per_hour: config.pixels_per_hour,
            limits: config.hour_limits(),
            touch_to_delete: config.touch_to_delete,
            available,
            committed: slots.clone(),
            slots,
            gesture: Gesture::Idle,
            touch: None,
        }
    }

    /// Current list, including edits of a gesture in progress.
    pub fn selections(&self) -> Vec<Selection> {
        self.slots.iter().map(|slot| slot.selection.clone()).collect()
    }

    /// List as of the last commit.
    pub fn committed(&self) -> Vec<Selection> {
        self.committed
            .iter()
            .map(|slot| slot.selection.clone())
            .collect()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn touch_to_delete(&self) -> bool {
        self.touch_to_delete
    }

    /// Pointer pressed on empty space: try to create a slot there.
    ///
    /// Returns whether a gesture started.
    pub fn pointer_down(&mut self, sample: PointerSample, geometry: ElementGeometry) -> bool {
        if !self.accepts_new_gesture() {
            return false;
        }
        self.create_at(sample.y, geometry, sample.at)
    }

    /// Pointer pressed on a slot's bottom handle.
    pub fn begin_resize(
        &mut self,
        selection: &Selection,
        sample: PointerSample,
        geometry: ElementGeometry,
    ) -> bool {
        let Some(index) = self.handle_target(selection) else {
            return false;
        };
        let position = self.relative_y(sample.y, geometry, DRAG_ROUND_MINUTES);
        self.gesture = Gesture::Resizing(EdgeDrag {
            index,
            last_position: position,
            min_minutes: MIN_SELECTION_MINUTES,
        });
        true
    }

    /// Pointer pressed on a slot's body.
    pub fn begin_move(
        &mut self,
        selection: &Selection,
        sample: PointerSample,
        geometry: ElementGeometry,
    ) -> bool {
        let Some(index) = self.handle_target(selection) else {
            return false;
        };
        let position = self.relative_y(sample.y, geometry, DRAG_ROUND_MINUTES);
        self.gesture = Gesture::Moving(MoveDrag {
            index,
            last_position: position,
        });
        true
    }

    /// Feed a pointer position to the active gesture.
    pub fn pointer_move(&mut self, sample: PointerSample, geometry: ElementGeometry) {
        let position = self.relative_y(sample.y, geometry, DRAG_ROUND_MINUTES);
        self.gesture = match self.gesture {
            Gesture::Idle => Gesture::Idle,
            Gesture::Creating(drag) => Gesture::Creating(self.resize_to(drag, position)),
            Gesture::Resizing(drag) => Gesture::Resizing(self.resize_to(drag, position)),
            Gesture::Moving(drag) => Gesture::Moving(self.move_to(drag, position)),
        };
    }

    /// End the active gesture and return the committed list.
    ///
    /// Returns `None` when no gesture was active, so a list is handed out
    /// exactly once per gesture.
    pub fn release(&mut self) -> Option<Vec<Selection>> {
        if self.gesture.is_idle() {
            return None;
        }
        self.gesture = Gesture::Idle;
        self.finalize_end_of_day();
        Some(self.commit())
    }

    /// Abandon the active gesture, discarding its tentative edits.
    pub fn cancel(&mut self) {
        if !self.gesture.is_idle() {
            log::debug!("Gesture cancelled, restoring {} slots", self.committed.len());
        }
        self.gesture = Gesture::Idle;
        self.touch = None;
        self.slots = self.committed.clone();
    }

    /// Remove the slot with the same start and end.
    ///
    /// Ignored while a gesture is active and within [`DELETE_GUARD_MS`] of the
    /// slot's own creation.
    pub fn delete(&mut self, selection: &Selection, at: DateTime<Utc>) -> Option<Vec<Selection>> {
        if !self.gesture.is_idle() {
            log::debug!("Delete ignored: gesture in progress");
            return None;
        }
        let index = self
            .slots
            .iter()
            .position(|slot| slot.selection.same_span(selection.start, selection.end))?;

        if let Some(created_at) = self.slots[index].created_at {
            if at.signed_duration_since(created_at) < Duration::milliseconds(DELETE_GUARD_MS) {
                log::debug!(
                    "Delete of {}-{} ignored: created {}ms ago",
                    selection.start,
                    selection.end,
                    at.signed_duration_since(created_at).num_milliseconds()
                );
                return None;
            }
        }

        self.slots.remove(index);
        Some(self.commit())
    }

    /// A tap landed on a slot. Deletes it in touch-to-delete mode.
    pub fn tap_selection(
        &mut self,
        selection: &Selection,
        at: DateTime<Utc>,
    ) -> Option<Vec<Selection>> {
        if !self.touch_to_delete {
            return None;
        }
        self.delete(selection, at)
    }

    pub fn touch_start(&mut self, sample: TouchSample, geometry: ElementGeometry) {
        if self.touch.is_some() || !self.accepts_new_gesture() {
            return;
        }
        self.touch = Some(TouchTracker::new(sample, geometry));
    }

    /// Track a finger. Once it leaves the tap slop the sequence creates a slot
    /// at the touch origin and stretches it like a mouse drag.
    pub fn touch_move(&mut self, sample: TouchSample) {
        let Some(mut tracker) = self.touch else {
            return;
        };
        tracker.current = Some(sample);

        if !tracker.dragging && !tracker.within_tap_slop() {
            tracker.dragging = true;
            let origin = tracker.origin;
            self.create_at(origin.y, tracker.geometry, origin.at);
        }
        self.touch = Some(tracker);

        if tracker.dragging {
            self.pointer_move(sample.as_pointer(), tracker.geometry);
        }
    }

    /// Finish a touch sequence: a tap creates and immediately commits a slot,
    /// a drag commits whatever it built.
    pub fn touch_end(&mut self) -> Option<Vec<Selection>> {
        let tracker = self.touch.take()?;
        if tracker.dragging {
            return self.release();
        }
        if tracker.within_tap_slop() {
            let origin = tracker.origin;
            if !self.create_at(origin.y, tracker.geometry, origin.at) {
                return None;
            }
            return self.release();
        }
        None
    }

    /// Empty the day. Always returns the (empty) list.
    pub fn clear(&mut self) -> Vec<Selection> {
        self.gesture = Gesture::Idle;
        self.touch = None;
        self.slots.clear();
        self.commit()
    }

    /// Pixel placement of a slot in the day column.
    pub fn slot_geometry(&self, selection: &Selection, frozen: bool) -> SlotGeometry {
        let top = time_of_day_to_pixels(selection.start, self.pixels_per_hour);
        let bottom = minutes_to_pixels(selection.end_minutes(), self.pixels_per_hour);
        let gap = if frozen {
            FROZEN_BOTTOM_GAP_MINUTES * self.pixels_per_hour / 60.0
        } else {
            0.0
        };
        SlotGeometry {
            top,
            height: (bottom - top - gap).max(1.0),
        }
    }

    fn accepts_new_gesture(&self) -> bool {
        if !self.available {
            log::debug!("Pointer input ignored: day unavailable");
            return false;
        }
        if !self.gesture.is_idle() {
            log::debug!("Pointer input ignored: gesture already active");
            return false;
        }
        if self.touch.is_some() {
            log::debug!("Pointer input ignored: touch sequence in progress");
            return false;
        }
        true
    }

    /// Index of a slot that may start a handle gesture (move or resize).
    fn handle_target(&self, selection: &Selection) -> Option<usize> {
        if !self.accepts_new_gesture() {
            return None;
        }
        if self.touch_to_delete {
            log::debug!("Slot handles are disabled in touch-to-delete mode");
            return None;
        }
        self.slots
            .iter()
            .position(|slot| slot.selection.same_span(selection.start, selection.end))
    }

    /// Pointer position in day pixels, snapped down onto the given grid.
    fn relative_y(&self, page_y: f64, geometry: ElementGeometry, round_minutes: u32) -> f64 {
        let real_y = page_y - geometry.top + self.limits.top;
        snap_to_grid(real_y, self.pixels_per_hour, round_minutes)
    }

    /// Start a new slot under the pointer at `page_y`.
    ///
    /// The press itself must land on free time: snapping to the hour may move
    /// the start out of a selection the pointer is actually on.
    fn create_at(&mut self, page_y: f64, geometry: ElementGeometry, at: DateTime<Utc>) -> bool {
        if !self.gesture.is_idle() {
            log::debug!("Create rejected: gesture already active");
            return false;
        }
        let pressed = pixels_to_minutes(
            page_y - geometry.top + self.limits.top,
            self.pixels_per_hour,
            1,
        );
        if let Some(hit) = u32::try_from(pressed).ok().and_then(TimeOfDay::from_minutes) {
            if self.slots.iter().any(|slot| slot.selection.contains(hit)) {
                log::debug!("Create rejected: pressed {} inside an existing selection", hit);
                return false;
            }
        }

        let position = self.relative_y(page_y, geometry, CREATE_ROUND_MINUTES);
        let start_minutes = pixels_to_minutes(position, self.pixels_per_hour, CREATE_ROUND_MINUTES);
        let Some(start) = u32::try_from(start_minutes)
            .ok()
            .and_then(TimeOfDay::from_minutes)
        else {
            log::debug!("Create rejected: position {} is outside the day", position);
            return false;
        };

        if self.slots.iter().any(|slot| slot.selection.contains(start)) {
            log::debug!("Create rejected: {} is inside an existing selection", start);
            return false;
        }

        let start = start.minutes_from_midnight();
        let tentative_end = start + CREATE_MIN_MINUTES;
        let end = nearest_start_within(
            self.slots.iter().map(|slot| &slot.selection),
            start,
            tentative_end,
        )
        .unwrap_or(tentative_end);

        let candidate = Selection {
            start: TimeOfDay::from_minutes_clamped(start as i64),
            end: end_time_of_day(end as i64),
            id: None,
        };
        if candidate.duration_minutes() < MIN_SELECTION_MINUTES {
            log::debug!(
                "Create rejected: only {} minutes free at {}",
                candidate.duration_minutes(),
                candidate.start
            );
            return false;
        }

        self.slots.push(Slot {
            selection: candidate,
            created_at: Some(at),
        });
        self.gesture = Gesture::Creating(EdgeDrag {
            index: self.slots.len() - 1,
            last_position: position,
            min_minutes: CREATE_MIN_MINUTES,
        });
        true
    }

    /// Stretch the end edge towards `position`; returns the updated drag state,
    /// or the unchanged one when the candidate is rejected.
    fn resize_to(&mut self, drag: EdgeDrag, position: f64) -> EdgeDrag {
        let Some(slot) = self.slots.get(drag.index) else {
            return drag;
        };
        let start = slot.selection.start;
        let start_px = time_of_day_to_pixels(start, self.pixels_per_hour);
        let min_position =
            start_px + minutes_to_pixels(drag.min_minutes, self.pixels_per_hour);
        let min_minutes = if min_position < position {
            MIN_SELECTION_MINUTES
        } else {
            drag.min_minutes
        };

        let end_minutes = pixels_to_minutes(
            min_position.max(position),
            self.pixels_per_hour,
            DRAG_ROUND_MINUTES,
        );
        let candidate = Selection {
            start,
            end: end_time_of_day(end_minutes),
            id: None,
        };
        if candidate.duration_minutes() < MIN_SELECTION_MINUTES {
            log::debug!("Resize rejected: {}-{} too short", candidate.start, candidate.end);
            return drag;
        }
        if has_overlap(
            self.slots.iter().map(|slot| &slot.selection),
            candidate.start_minutes(),
            candidate.end_minutes(),
            Some(drag.index),
        ) {
            log::debug!("Resize rejected: {}-{} overlaps", candidate.start, candidate.end);
            return drag;
        }

        self.slots[drag.index].selection.end = candidate.end;
        EdgeDrag {
            index: drag.index,
            last_position: position,
            min_minutes,
        }
    }

    /// Shift the slot by the snapped distance since the last sample.
    fn move_to(&mut self, drag: MoveDrag, position: f64) -> MoveDrag {
        let Some(slot) = self.slots.get(drag.index) else {
            return drag;
        };
        let diff = pixels_to_minutes(position, self.pixels_per_hour, DRAG_ROUND_MINUTES)
            - pixels_to_minutes(drag.last_position, self.pixels_per_hour, DRAG_ROUND_MINUTES);
        if diff == 0 {
            return MoveDrag {
                index: drag.index,
                last_position: position,
            };
        }

        let start = slot.selection.start_minutes() as i64;
        let end = edge_minutes(&slot.selection) as i64;
        let mut new_start = start + diff;
        let mut new_end = end + diff;

        // Pinned against a visible boundary and still pushing: keep that edge
        // where it is so the slot compresses instead of leaving the range.
        if self.reached_top(start) && diff < 0 {
            new_start = start;
        }
        if self.reached_bottom(end) && diff > 0 {
            new_end = end;
        }

        if new_start < 0 || new_end > MINUTES_PER_DAY as i64 {
            log::debug!("Move rejected: {}..{} leaves the day", new_start, new_end);
            return drag;
        }
        let candidate = Selection {
            start: TimeOfDay::from_minutes_clamped(new_start),
            end: end_time_of_day(new_end),
            id: None,
        };
        if candidate.duration_minutes() < MIN_SELECTION_MINUTES {
            log::debug!("Move rejected: {}-{} too short", candidate.start, candidate.end);
            return drag;
        }
        if has_overlap(
            self.slots.iter().map(|slot| &slot.selection),
            candidate.start_minutes(),
            candidate.end_minutes(),
            Some(drag.index),
        ) {
            log::debug!("Move rejected: {}-{} overlaps", candidate.start, candidate.end);
            return drag;
        }

        let selection = &mut self.slots[drag.index].selection;
        selection.start = candidate.start;
        selection.end = candidate.end;
        MoveDrag {
            index: drag.index,
            last_position: position,
        }
    }

    fn reached_top(&self, start_minutes: i64) -> bool {
        minutes_to_pixels(start_minutes.max(0) as u32, self.pixels_per_hour) <= self.limits.top
    }

    fn reached_bottom(&self, end_minutes: i64) -> bool {
        minutes_to_pixels(end_minutes.max(0) as u32, self.pixels_per_hour) >= self.limits.bottom
    }

    /// Collapse ends that run to midnight to the 23:45 display value, unless
    /// that would leave the slot under the minimum length.
    fn finalize_end_of_day(&mut self) {
        let display_end = TimeOfDay::DISPLAY_END_OF_DAY.minutes_from_midnight();
        for slot in &mut self.slots {
            let selection = &mut slot.selection;
            if selection.end.is_end_of_day()
                && display_end >= selection.start_minutes() + MIN_SELECTION_MINUTES
            {
                selection.end = TimeOfDay::DISPLAY_END_OF_DAY;
            }
        }
    }

    fn commit(&mut self) -> Vec<Selection> {
        self.slots.sort_by_key(|slot| slot.selection.start);
        self.committed = self.slots.clone();
        let selections = self.selections();
        log::info!("Committed {} selections", selections.len());
        selections
    }
}

/// End edge for a raw minute count; 24:00 and beyond become the 23:59 marker.
fn end_time_of_day(minutes: i64) -> TimeOfDay {
    TimeOfDay::from_minutes_clamped(minutes)
}

/// End edge in minutes, reading the 23:59 marker as a full day.
fn edge_minutes(selection: &Selection) -> u32 {
    if selection.end == TimeOfDay::END_OF_DAY {
        MINUTES_PER_DAY
    } else {
        selection.end_minutes()
    }
}
