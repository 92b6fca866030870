// Settings module
// Static widget configuration: raw TOML shape and its validated form

use anyhow::{Context, Result as AnyResult};
use chrono::Weekday;
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigurationError, Result};
use crate::models::week::WeekStartDay;

pub const DEFAULT_PIXELS_PER_HOUR: f64 = 50.0;

/// Extra pixels below the bottom boundary that still accept pointer input,
/// so the last slot's resize handle stays reachable.
const TARGET_OVERHANG_MINUTES: f64 = 14.0;

/// How hour labels and slot timespans are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeConvention {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl FromStr for TimeConvention {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "24h" => Ok(TimeConvention::TwentyFourHour),
            "12h" => Ok(TimeConvention::TwelveHour),
            other => Err(ConfigurationError::InvalidTimeConvention(other.to_string())),
        }
    }
}

/// Whole hours of the day that accept selections, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HourRange {
    pub start: u32,
    pub end: u32,
}

impl HourRange {
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start >= end || end > 24 {
            return Err(ConfigurationError::InvalidHourRange { start, end });
        }
        Ok(Self { start, end })
    }
}

impl Default for HourRange {
    fn default() -> Self {
        Self { start: 0, end: 24 }
    }
}

/// Pixel boundaries derived from the visible hour range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourLimits {
    /// Height of the blocked area above the visible range; also the y offset
    /// added to pointer positions inside the interactive area.
    pub top: f64,
    /// Y of the bottom edge of the visible range.
    pub bottom: f64,
    /// Height of the blocked area below the visible range.
    pub bottom_height: f64,
    /// Height of the interactive area.
    pub difference: f64,
}

/// Raw settings as they appear in a TOML file. Nothing here is trusted until
/// it goes through [`WidgetConfig::from_settings`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub time_zone: Option<String>,
    pub week_start: Option<String>,
    pub visible_hours: HourRange,
    pub pixels_per_hour: Option<f64>,
    pub touch_to_delete: bool,
    pub time_convention: Option<String>,
    pub available_days: Option<Vec<String>>,
}

/// Validated configuration shared by every day of a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub time_zone: Tz,
    pub week_start: WeekStartDay,
    pub visible_hours: HourRange,
    pub pixels_per_hour: f64,
    /// Tapping a slot deletes it (touch devices) instead of showing handles.
    pub touch_to_delete: bool,
    pub time_convention: TimeConvention,
    pub available_days: HashSet<Weekday>,
}

impl WidgetConfig {
    /// Build a configuration with default display settings.
    ///
    /// The time zone is mandatory: an unknown IANA name fails here rather than
    /// falling back to UTC.
    pub fn new(time_zone: &str, week_start: WeekStartDay) -> Result<Self> {
        Ok(Self {
            time_zone: parse_time_zone(Some(time_zone))?,
            week_start,
            visible_hours: HourRange::default(),
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
            touch_to_delete: false,
            time_convention: TimeConvention::default(),
            available_days: all_weekdays(),
        })
    }

    pub fn with_visible_hours(mut self, start: u32, end: u32) -> Result<Self> {
        self.visible_hours = HourRange::new(start, end)?;
        Ok(self)
    }

    pub fn with_pixels_per_hour(mut self, pixels_per_hour: f64) -> Result<Self> {
        self.pixels_per_hour = validate_pixels_per_hour(pixels_per_hour)?;
        Ok(self)
    }

    pub fn with_touch_to_delete(mut self, touch_to_delete: bool) -> Self {
        self.touch_to_delete = touch_to_delete;
        self
    }

    pub fn with_time_convention(mut self, convention: TimeConvention) -> Self {
        self.time_convention = convention;
        self
    }

    pub fn with_available_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.available_days = days.into_iter().collect();
        self
    }

    /// Validate raw settings into a typed configuration.
    pub fn from_settings(settings: WidgetSettings) -> Result<Self> {
        let time_zone = parse_time_zone(settings.time_zone.as_deref())?;
        let week_start = settings
            .week_start
            .as_deref()
            .ok_or(ConfigurationError::MissingWeekStart)?
            .parse::<WeekStartDay>()?;
        let visible_hours =
            HourRange::new(settings.visible_hours.start, settings.visible_hours.end)?;
        let pixels_per_hour = validate_pixels_per_hour(
            settings.pixels_per_hour.unwrap_or(DEFAULT_PIXELS_PER_HOUR),
        )?;
        let time_convention = match settings.time_convention.as_deref() {
            Some(raw) => raw.parse()?,
            None => TimeConvention::default(),
        };
        let available_days = match settings.available_days {
            Some(names) => names
                .iter()
                .map(|name| {
                    name.parse::<Weekday>()
                        .map_err(|_| ConfigurationError::InvalidWeekday(name.clone()))
                })
                .collect::<Result<HashSet<_>>>()?,
            None => all_weekdays(),
        };

        log::info!(
            "Widget configured: time_zone={}, week_start={}, hours={}..{}",
            time_zone,
            week_start,
            visible_hours.start,
            visible_hours.end
        );

        Ok(Self {
            time_zone,
            week_start,
            visible_hours,
            pixels_per_hour,
            touch_to_delete: settings.touch_to_delete,
            time_convention,
            available_days,
        })
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: WidgetSettings = toml::from_str(source)?;
        Self::from_settings(settings)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> AnyResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn minute_in_pixels(&self) -> f64 {
        self.pixels_per_hour / 60.0
    }

    pub fn hour_limits(&self) -> HourLimits {
        let HourRange { start, end } = self.visible_hours;
        let pph = self.pixels_per_hour;
        HourLimits {
            top: start as f64 * pph,
            bottom: end as f64 * pph,
            bottom_height: (24 - end) as f64 * pph,
            difference: (end - start) as f64 * pph
                + TARGET_OVERHANG_MINUTES * self.minute_in_pixels(),
        }
    }

    pub fn is_available(&self, weekday: Weekday) -> bool {
        self.available_days.contains(&weekday)
    }
}

/// Resolve a required IANA zone name.
pub fn parse_time_zone(name: Option<&str>) -> Result<Tz> {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ConfigurationError::MissingTimeZone)?;
    name.parse::<Tz>()
        .map_err(|_| ConfigurationError::InvalidTimeZone(name.to_string()))
}

fn validate_pixels_per_hour(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigurationError::InvalidPixelsPerHour(value))
    }
}

fn all_weekdays() -> HashSet<Weekday> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
        time_zone = "America/Los_Angeles"
        week_start = "monday"
        pixels_per_hour = 40.0
        touch_to_delete = true
        time_convention = "12h"
        available_days = ["monday", "tuesday", "wednesday", "thursday", "friday"]

        [visible_hours]
        start = 1
        end = 24
    "#;

    #[test]
    fn test_full_config_parses() {
        let config = WidgetConfig::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(config.time_zone, chrono_tz::America::Los_Angeles);
        assert_eq!(config.week_start, WeekStartDay::Monday);
        assert_eq!(config.visible_hours, HourRange { start: 1, end: 24 });
        assert_eq!(config.pixels_per_hour, 40.0);
        assert!(config.touch_to_delete);
        assert_eq!(config.time_convention, TimeConvention::TwelveHour);
        assert!(config.is_available(Weekday::Fri));
        assert!(!config.is_available(Weekday::Sat));
    }

    #[test]
    fn test_missing_time_zone_is_an_error() {
        let err = WidgetConfig::from_toml_str(r#"week_start = "sunday""#).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingTimeZone));
    }

    #[test]
    fn test_blank_time_zone_is_missing() {
        assert!(matches!(
            parse_time_zone(Some("  ")),
            Err(ConfigurationError::MissingTimeZone)
        ));
    }

    #[test]
    fn test_unknown_time_zone_is_an_error() {
        let err = WidgetConfig::new("Mars/Olympus_Mons", WeekStartDay::Sunday).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidTimeZone(ref name) if name == "Mars/Olympus_Mons"));
    }

    #[test]
    fn test_missing_week_start_is_an_error() {
        let err = WidgetConfig::from_toml_str(r#"time_zone = "UTC""#).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingWeekStart));
    }

    #[test]
    fn test_invalid_hour_range() {
        let err = WidgetConfig::new("UTC", WeekStartDay::Sunday)
            .unwrap()
            .with_visible_hours(18, 9)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidHourRange { start: 18, end: 9 }
        ));
    }

    #[test]
    fn test_invalid_pixels_per_hour() {
        let result = WidgetConfig::new("UTC", WeekStartDay::Sunday)
            .unwrap()
            .with_pixels_per_hour(0.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_weekday_name() {
        let source = r#"
            time_zone = "UTC"
            week_start = "sunday"
            available_days = ["someday"]
        "#;
        let err = WidgetConfig::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidWeekday(ref name) if name == "someday"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = WidgetConfig::from_toml_str("time_zone = ").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }

    #[test]
    fn test_hour_limits() {
        let config = WidgetConfig::new("UTC", WeekStartDay::Sunday)
            .unwrap()
            .with_pixels_per_hour(60.0)
            .unwrap()
            .with_visible_hours(8, 20)
            .unwrap();
        let limits = config.hour_limits();
        assert_eq!(limits.top, 480.0);
        assert_eq!(limits.bottom, 1200.0);
        assert_eq!(limits.bottom_height, 240.0);
        assert_eq!(limits.difference, 720.0 + 14.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget.toml");
        std::fs::write(&path, FULL_CONFIG).unwrap();

        let config = WidgetConfig::load(&path).unwrap();
        assert_eq!(config.week_start, WeekStartDay::Monday);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = WidgetConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
