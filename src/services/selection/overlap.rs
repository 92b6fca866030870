//! Collision checks between a candidate range and a day's selections.
//!
//! Ranges are half-open minute intervals; touching ranges do not collide.

use crate::models::selection::Selection;

/// First selection, other than `ignore`, sharing time with `[start, end)`.
fn find_overlap<'a>(
    selections: impl IntoIterator<Item = &'a Selection>,
    start: u32,
    end: u32,
    ignore: Option<usize>,
) -> Option<&'a Selection> {
    selections
        .into_iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != ignore)
        .map(|(_, selection)| selection)
        .find(|selection| selection.overlaps_minutes(start, end))
}

pub fn has_overlap<'a>(
    selections: impl IntoIterator<Item = &'a Selection>,
    start: u32,
    end: u32,
    ignore: Option<usize>,
) -> bool {
    find_overlap(selections, start, end, ignore).is_some()
}

/// Earliest selection start strictly inside `(start, end)`, used to shrink a
/// new slot so that it fills the gap before its neighbour.
pub fn nearest_start_within<'a>(
    selections: impl IntoIterator<Item = &'a Selection>,
    start: u32,
    end: u32,
) -> Option<u32> {
    selections
        .into_iter()
        .map(Selection::start_minutes)
        .filter(|&s| start < s && s < end)
        .min()
}
