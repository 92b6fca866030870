// Available Times demo
// Replays a scripted gesture against the current week and prints the result

use anyhow::{Context, Result};
use available_times::models::event::CalendarEvent;
use available_times::models::selection::TimeSpan;
use available_times::models::settings::WidgetConfig;
use available_times::services::availability::{AvailabilityWeek, SelectionSink, WeekSelections};
use available_times::services::selection::{ElementGeometry, PointerSample, TouchSample};
use available_times::utils::date::{format_time_span, hour_labels};
use chrono::{Duration, Utc};

const DEFAULT_CONFIG: &str = r#"
time_zone = "Europe/London"
week_start = "monday"
pixels_per_hour = 50.0
time_convention = "24h"
available_days = ["Mon", "Tue", "Wed", "Thu", "Fri"]

[visible_hours]
start = 7
end = 20
"#;

/// Prints every committed week as JSON.
struct JsonSink;

impl SelectionSink for JsonSink {
    fn selections_changed(&mut self, selections: WeekSelections) {
        match serde_json::to_string_pretty(&selections) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Failed to serialize selections: {}", err),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => WidgetConfig::load(&path)?,
        None => WidgetConfig::from_toml_str(DEFAULT_CONFIG)
            .context("Built-in configuration is invalid")?,
    };
    log::info!("Starting available-times demo in {}", config.time_zone);

    let now = Utc::now();
    let mut week = AvailabilityWeek::new(
        config.clone(),
        now,
        WeekSelections::Absolute(Vec::<TimeSpan>::new()),
        JsonSink,
    );

    println!("Ruler: {}", hour_labels(config.time_convention).join(" "));

    let Some(day) = week.week().days.iter().position(|day| day.available) else {
        log::warn!("No available day this week, nothing to replay");
        return Ok(());
    };

    // Background events the user is already booked into
    let midnight = week.week().days[day].instant;
    let events = [("Standup", 9, 30, 45), ("Design review", 10, 0, 90), ("Lunch", 12, 0, 60)]
        .into_iter()
        .map(|(title, hour, minute, length)| {
            let start = midnight + Duration::hours(hour) + Duration::minutes(minute);
            CalendarEvent::builder()
                .title(title)
                .start(start)
                .end(start + Duration::minutes(length))
                .build()
                .map_err(anyhow::Error::msg)
        })
        .collect::<Result<Vec<_>>>()?;
    week.set_events(events);
    for placed in week.layout_events(day) {
        println!(
            "Event {:<14} column {}/{} width {:.2}",
            placed.event.title,
            placed.column + 1,
            placed.columns,
            placed.width
        );
    }

    // The interactive area starts at the first visible hour
    let limits = config.hour_limits();
    let geometry = ElementGeometry::new(200.0);
    let page_y = |hour: f64| geometry.top + hour * config.pixels_per_hour - limits.top;

    // Press at 09:00 and drag down to 11:00
    week.pointer_down(day, PointerSample::new(page_y(9.0), now), geometry);
    week.pointer_move(day, PointerSample::new(page_y(11.0), now), geometry);
    week.release(day);

    // A tap at 14:00 on the same day
    let tap_at = now + Duration::seconds(1);
    week.touch_start(day, TouchSample::new(40.0, page_y(14.0), tap_at), geometry);
    week.touch_end(day);

    if let Some(engine) = week.day(day) {
        for selection in engine.committed() {
            println!(
                "{}: {}",
                week.week().days[day].name,
                format_time_span(selection.start, selection.end, config.time_convention, false)
            );
        }
    }

    week.set_recurring(true);
    Ok(())
}
