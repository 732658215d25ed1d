//! Display helpers for dates, durations and text.
//!
//! Functions taking raw strings never fail: unparseable input renders as
//! [`INVALID_DATE`] so the page shows something instead of a blank.

use chrono::NaiveDateTime;

use crate::validation::parse_datetime;

pub const INVALID_DATE: &str = "Invalid date";

/// `March 5, 2025`
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `06:30 PM`
pub fn format_time(date: &NaiveDateTime) -> String {
    date.format("%I:%M %p").to_string()
}

/// `Mar 5, 2025, 06:30 PM`
pub fn format_datetime(date: &NaiveDateTime) -> String {
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Format a backend or input date string; empty input stays empty.
pub fn format_date_str(value: &str) -> String {
    format_str_with(value, format_datetime)
}

pub fn format_day_str(value: &str) -> String {
    format_str_with(value, format_date)
}

fn format_str_with(value: &str, f: fn(&NaiveDateTime) -> String) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match parse_datetime(value) {
        Some(date) => f(&date),
        None => INVALID_DATE.to_string(),
    }
}

/// `Mar 5 - Mar 7, 2025` style range, collapsing same-day ranges to one date
/// with both times.
pub fn format_range(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    if start.date() == end.date() {
        format!("{}, {} - {}", format_date(start), format_time(start), format_time(end))
    } else {
        format!("{} - {}", format_datetime(start), format_datetime(end))
    }
}

/// "3 days ago", "1 hour ago", "just now". Future dates read as "just now".
pub fn format_relative(date: &NaiveDateTime, now: &NaiveDateTime) -> String {
    const INTERVALS: [(&str, i64); 7] = [
        ("year", 31_536_000),
        ("month", 2_592_000),
        ("week", 604_800),
        ("day", 86_400),
        ("hour", 3_600),
        ("minute", 60),
        ("second", 1),
    ];
    let elapsed = (*now - *date).num_seconds();
    for (unit, seconds) in INTERVALS {
        let count = elapsed / seconds;
        if count >= 1 {
            return if count == 1 {
                format!("1 {unit} ago")
            } else {
                format!("{count} {unit}s ago")
            };
        }
    }
    "just now".to_string()
}

/// `2d 4h`, `3h 5m`, `4m 10s`, `12s`.
pub fn format_duration_ms(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days}d {}h", hours % 24)
    } else if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

/// Truncate to `max_chars` characters, appending `...` when shortened.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Up to `max` uppercase initials of a name.
pub fn initials(name: &str, max: usize) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(max)
        .collect()
}

pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `1 seat`, `3 seats`, or an explicit plural.
pub fn pluralize(count: u64, singular: &str, plural: Option<&str>) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        match plural {
            Some(plural) => format!("{count} {plural}"),
            None => format!("{count} {singular}s"),
        }
    }
}

/// Resolve an uploaded-file path returned by the backend against its origin.
pub fn file_url(path: &str, base_url: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http") || path.starts_with("//") || path.starts_with("data:") {
        return Some(path.to_string());
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{base}{path}"))
    } else {
        Some(format!("{base}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn dates() {
        let d = dt("2025-03-05T18:30");
        assert_eq!(format_date(&d), "March 5, 2025");
        assert_eq!(format_time(&d), "06:30 PM");
        assert_eq!(format_datetime(&d), "Mar 5, 2025, 06:30 PM");
        assert_eq!(format_date_str("2025-03-05T18:30:00"), "Mar 5, 2025, 06:30 PM");
        assert_eq!(format_date_str(""), "");
        assert_eq!(format_date_str("not a date"), INVALID_DATE);
    }

    #[test]
    fn ranges_collapse_same_day() {
        let start = dt("2025-03-05T09:00");
        assert_eq!(
            format_range(&start, &dt("2025-03-05T11:00")),
            "March 5, 2025, 09:00 AM - 11:00 AM"
        );
        assert!(format_range(&start, &dt("2025-03-06T11:00")).contains(" - Mar 6"));
    }

    #[test]
    fn relative_time() {
        let now = dt("2025-03-10T12:00");
        assert_eq!(format_relative(&dt("2025-03-10T11:59:30"), &now), "30 seconds ago");
        assert_eq!(format_relative(&dt("2025-03-10T11:00"), &now), "1 hour ago");
        assert_eq!(format_relative(&dt("2025-03-07T12:00"), &now), "3 days ago");
        assert_eq!(format_relative(&dt("2025-03-11T12:00"), &now), "just now");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration_ms(12_000), "12s");
        assert_eq!(format_duration_ms(250_000), "4m 10s");
        assert_eq!(format_duration_ms(3 * 3_600_000 + 300_000), "3h 5m");
        assert_eq!(format_duration_ms(52 * 3_600_000), "2d 4h");
    }

    #[test]
    fn text_helpers() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("hello wonderful world", 6), "hello...");
        assert_eq!(initials("ada  king lovelace", 2), "AK");
        assert_eq!(title_case("hELLO wORLD"), "Hello World");
        assert_eq!(pluralize(1, "seat", None), "1 seat");
        assert_eq!(pluralize(3, "seat", None), "3 seats");
        assert_eq!(pluralize(2, "person", Some("people")), "2 people");
    }

    #[test]
    fn file_urls() {
        assert_eq!(file_url("", "http://api"), None);
        assert_eq!(
            file_url("https://cdn/x.png", "http://api").as_deref(),
            Some("https://cdn/x.png")
        );
        assert_eq!(
            file_url("/static/x.png", "http://api/").as_deref(),
            Some("http://api/static/x.png")
        );
        assert_eq!(
            file_url("static/x.png", "http://api").as_deref(),
            Some("http://api/static/x.png")
        );
    }
}
