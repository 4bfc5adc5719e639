// Date and clock-time helpers
// Shared by the services layer and the grid engine

use chrono::{Datelike, NaiveDate, NaiveTime};

/// Convert an "HH:MM" or "HH:MM:SS" clock string to minutes since midnight.
///
/// Malformed input falls back to 0 minutes instead of erroring; callers
/// that must reject bad input use [`parse_clock_time`] instead.
pub fn time_to_minutes(time: &str) -> i64 {
    let mut parts = time.splitn(3, ':');
    let hours = parts.next().and_then(|p| p.parse::<i64>().ok());
    let minutes = parts.next().and_then(|p| p.parse::<i64>().ok());

    match (hours, minutes) {
        (Some(h), Some(m)) => h * 60 + m,
        _ => 0,
    }
}

/// Strictly parse an "HH:MM:SS" or "HH:MM" clock string.
pub fn parse_clock_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()
}

/// Truncate a stored clock string to "HH:MM" for display.
pub fn format_clock_time(time: &str) -> &str {
    if time.len() >= 5 {
        &time[..5]
    } else {
        time
    }
}

/// Day-of-week index for a calendar date, 0 = Sunday .. 6 = Saturday.
pub fn day_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Human phrase for how far away a due date is.
pub fn describe_due_date(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();

    if days < 0 {
        "Overdue".to_string()
    } else if days == 0 {
        "Today".to_string()
    } else if days == 1 {
        "Tomorrow".to_string()
    } else if days <= 7 {
        format!("In {} days", days)
    } else {
        due.format("%-d %b").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_time_to_minutes_full_form() {
        assert_eq!(time_to_minutes("08:30:00"), 510);
        assert_eq!(time_to_minutes("00:00:00"), 0);
        assert_eq!(time_to_minutes("22:00:00"), 1320);
    }

    #[test]
    fn test_time_to_minutes_short_form() {
        assert_eq!(time_to_minutes("07:15"), 435);
    }

    #[test]
    fn test_time_to_minutes_malformed_falls_back_to_zero() {
        assert_eq!(time_to_minutes(""), 0);
        assert_eq!(time_to_minutes("noon"), 0);
        assert_eq!(time_to_minutes("8"), 0);
        assert_eq!(time_to_minutes("8:xx"), 0);
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(
            parse_clock_time("08:30:00"),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(parse_clock_time("08:30"), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_clock_time("25:00"), None);
        assert_eq!(parse_clock_time("noon"), None);
    }

    #[test]
    fn test_format_clock_time() {
        assert_eq!(format_clock_time("08:30:00"), "08:30");
        assert_eq!(format_clock_time("08:30"), "08:30");
        assert_eq!(format_clock_time("8:3"), "8:3");
    }

    #[test]
    fn test_day_index() {
        // 2025-01-05 is a Sunday
        assert_eq!(day_index(date(2025, 1, 5)), 0);
        assert_eq!(day_index(date(2025, 1, 6)), 1);
        assert_eq!(day_index(date(2025, 1, 11)), 6);
    }

    #[test]
    fn test_describe_due_date() {
        let today = date(2025, 3, 10);
        assert_eq!(describe_due_date(date(2025, 3, 9), today), "Overdue");
        assert_eq!(describe_due_date(date(2025, 3, 10), today), "Today");
        assert_eq!(describe_due_date(date(2025, 3, 11), today), "Tomorrow");
        assert_eq!(describe_due_date(date(2025, 3, 15), today), "In 5 days");
        assert_eq!(describe_due_date(date(2025, 4, 20), today), "20 Apr");
    }
}
