// Available Times Library
// Scheduling core: selection state machine, week windows and event layout

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::ConfigurationError;
