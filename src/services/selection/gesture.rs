//! The active gesture of a day column.
//!
//! Exactly one gesture can be in flight per day. Every transition replaces
//! the whole value; nothing about a gesture outlives its release.

/// Drag of a slot's end edge. Used both for a freshly created slot and for
/// an explicit resize from the bottom handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDrag {
    /// Index of the slot in the engine's working list.
    pub index: usize,
    /// Last snapped pointer position, in day pixels.
    pub last_position: f64,
    /// Current minimum slot length. Starts at 60 for new slots and drops to 30
    /// for good once the pointer has passed it.
    pub min_minutes: u32,
}

/// Drag of a whole slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDrag {
    pub index: usize,
    pub last_position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Creating(EdgeDrag),
    Resizing(EdgeDrag),
    Moving(MoveDrag),
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(Gesture::default().is_idle());
    }

    #[test]
    fn test_active_gestures_are_not_idle() {
        let drag = EdgeDrag {
            index: 2,
            last_position: 100.0,
            min_minutes: 60,
        };
        assert!(!Gesture::Creating(drag).is_idle());
        assert!(!Gesture::Resizing(drag).is_idle());
        assert!(!Gesture::Moving(MoveDrag {
            index: 4,
            last_position: 0.0
        })
        .is_idle());
    }
}
