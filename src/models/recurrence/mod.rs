// Recurrence module
// Week-relative slots: a single weekly anchor plus minute offsets

use serde::{Deserialize, Serialize};

/// Minutes in one week.
pub const WEEK_MINUTES: u32 = 7 * 24 * 60;

/// A weekly repeating slot, stored as minutes since the configured week start.
///
/// `start_minutes` is always in `[0, WEEK_MINUTES)`. `end_minutes` is the start
/// plus the slot's wall-clock length, so it never precedes the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurringSelection {
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl RecurringSelection {
    pub fn new(start_minutes: u32, end_minutes: u32) -> Result<Self, String> {
        if start_minutes >= WEEK_MINUTES {
            return Err(format!(
                "Recurring start {} is outside the week (0..{})",
                start_minutes, WEEK_MINUTES
            ));
        }
        if end_minutes <= start_minutes {
            return Err("Recurring end must be after start".to_string());
        }
        Ok(Self {
            start_minutes,
            end_minutes,
        })
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }

    /// Zero-based day of the configured week the slot starts on.
    pub fn day_index(&self) -> usize {
        (self.start_minutes / (24 * 60)) as usize
    }
}
