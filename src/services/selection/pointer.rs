// Pointer input
// Samples and geometry handed over by the presentation layer

use chrono::{DateTime, Utc};

/// Movement under this many pixels on both axes still counts as a tap.
pub const TAP_SLOP_PX: f64 = 20.0;

/// A mouse or single-finger position, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub y: f64,
    pub at: DateTime<Utc>,
}

impl PointerSample {
    pub fn new(y: f64, at: DateTime<Utc>) -> Self {
        Self { y, at }
    }
}

/// Where the interactive area of a day column sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementGeometry {
    /// Page y of the top edge, with page scroll already folded in.
    pub top: f64,
}

impl ElementGeometry {
    pub fn new(top: f64) -> Self {
        Self { top }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub x: f64,
    pub y: f64,
    pub at: DateTime<Utc>,
}

impl TouchSample {
    pub fn new(x: f64, y: f64, at: DateTime<Utc>) -> Self {
        Self { x, y, at }
    }

    pub fn as_pointer(&self) -> PointerSample {
        PointerSample::new(self.y, self.at)
    }
}

/// Tracks one touch sequence until it is classified as a tap or a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TouchTracker {
    pub origin: TouchSample,
    pub current: Option<TouchSample>,
    pub geometry: ElementGeometry,
    /// Set once movement leaves the tap slop; the sequence then drives a gesture.
    pub dragging: bool,
}

impl TouchTracker {
    pub fn new(origin: TouchSample, geometry: ElementGeometry) -> Self {
        Self {
            origin,
            current: None,
            geometry,
            dragging: false,
        }
    }

    pub fn within_tap_slop(&self) -> bool {
        let current = self.current.unwrap_or(self.origin);
        (current.x - self.origin.x).abs() < TAP_SLOP_PX
            && (current.y - self.origin.y).abs() < TAP_SLOP_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_no_movement_is_a_tap() {
        let tracker = TouchTracker::new(TouchSample::new(10.0, 10.0, at()), ElementGeometry::default());
        assert!(tracker.within_tap_slop());
    }

    #[test]
    fn test_small_movement_is_a_tap() {
        let mut tracker =
            TouchTracker::new(TouchSample::new(10.0, 10.0, at()), ElementGeometry::default());
        tracker.current = Some(TouchSample::new(29.0, 1.0, at()));
        assert!(tracker.within_tap_slop());
    }

    #[test]
    fn test_horizontal_swipe_is_not_a_tap() {
        let mut tracker =
            TouchTracker::new(TouchSample::new(10.0, 10.0, at()), ElementGeometry::default());
        tracker.current = Some(TouchSample::new(30.0, 10.0, at()));
        assert!(!tracker.within_tap_slop());
    }
}
