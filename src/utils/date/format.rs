//! Label formatting for the hour ruler and slot timespans.

use chrono::NaiveTime;

use crate::models::settings::TimeConvention;
use crate::models::time_of_day::TimeOfDay;

/// The 24 labels of the hour ruler, one per hour starting at midnight.
pub fn hour_labels(convention: TimeConvention) -> Vec<String> {
    (0..24)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .map(|time| match convention {
            TimeConvention::TwelveHour => time.format("%-I%P").to_string(),
            TimeConvention::TwentyFourHour => time.format("%H").to_string(),
        })
        .collect()
}

/// Format a slot boundary. Frozen (read-only) slots drop ":00" on whole hours.
pub fn format_time(time: TimeOfDay, convention: TimeConvention, frozen: bool) -> String {
    let naive = time.to_naive_time();
    let short = frozen && time.minute() == 0;
    let pattern = match (convention, short) {
        (TimeConvention::TwelveHour, true) => "%-I%P",
        (TimeConvention::TwelveHour, false) => "%I:%M%P",
        (TimeConvention::TwentyFourHour, true) => "%H",
        (TimeConvention::TwentyFourHour, false) => "%H:%M",
    };
    naive.format(pattern).to_string()
}

pub fn format_time_span(
    start: TimeOfDay,
    end: TimeOfDay,
    convention: TimeConvention,
    frozen: bool,
) -> String {
    format!(
        "{}-{}",
        format_time(start, convention, frozen),
        format_time(end, convention, frozen)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    #[test]
    fn test_hour_labels_24h() {
        let labels = hour_labels(TimeConvention::TwentyFourHour);
        assert_eq!(labels.len(), 24);
        assert_eq!(labels[0], "00");
        assert_eq!(labels[13], "13");
    }

    #[test]
    fn test_hour_labels_12h() {
        let labels = hour_labels(TimeConvention::TwelveHour);
        assert_eq!(labels[0], "12am");
        assert_eq!(labels[9], "9am");
        assert_eq!(labels[12], "12pm");
        assert_eq!(labels[23], "11pm");
    }

    #[test]
    fn test_format_time_span_24h() {
        let span = format_time_span(t(9, 0), t(10, 30), TimeConvention::TwentyFourHour, false);
        assert_eq!(span, "09:00-10:30");
    }

    #[test]
    fn test_format_time_span_12h_frozen() {
        let span = format_time_span(t(14, 0), t(15, 30), TimeConvention::TwelveHour, true);
        assert_eq!(span, "2pm-03:30pm");
    }
}
