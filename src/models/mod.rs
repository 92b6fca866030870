// Module exports for models

pub mod event;
pub mod recurrence;
pub mod selection;
pub mod settings;
pub mod time_of_day;
pub mod week;
