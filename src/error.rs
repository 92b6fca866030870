//! Error types for widget configuration.
//!
//! Constraint violations during gestures (overlap, too-short slots, a second
//! pointer while one is active) are not errors: they are silent no-ops inside
//! the selection engine. The only failure surfaced to callers is a bad
//! configuration, and it surfaces when the configuration is built.

use thiserror::Error;

/// Raised when the static widget configuration is missing or malformed.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing required field: time_zone")]
    MissingTimeZone,

    #[error("Unknown IANA time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Missing required field: week_start")]
    MissingWeekStart,

    #[error("Week start must be 'sunday' or 'monday', got '{0}'")]
    InvalidWeekStart(String),

    #[error("Invalid visible hour range {start}..{end}: must satisfy 0 <= start < end <= 24")]
    InvalidHourRange { start: u32, end: u32 },

    #[error("Pixels per hour must be a positive finite number, got {0}")]
    InvalidPixelsPerHour(f64),

    #[error("Unknown weekday name: {0}")]
    InvalidWeekday(String),

    #[error("Time convention must be '12h' or '24h', got '{0}'")]
    InvalidTimeConvention(String),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
