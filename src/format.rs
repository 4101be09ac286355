use chrono::{DateTime, Local, TimeZone};

/// Short date and time in the viewer's local zone, e.g. `11/14/23, 10:13 PM`.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    format_timestamp_in(timestamp_ms, &Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(tz)
        .format("%-m/%-d/%y, %-I:%M %p")
        .to_string()
}

/// Avatar letters: the first character of each word, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
