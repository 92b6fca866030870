// Service module exports

pub mod availability;
pub mod layout;
pub mod recurrence;
pub mod selection;
pub mod week;
