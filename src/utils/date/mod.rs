// Date utility functions
// Calendar-date parsing/formatting and minute-boundary timing

use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's calendar date in the local environment. Never cache this: a
/// session that crosses midnight must see the new day on the next load.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Short marker used on cells whose local date differs from the reference
/// row, e.g. `Mon 19 Oct`.
pub fn format_day_marker(date: NaiveDate) -> String {
    date.format("%a %d %b").to_string()
}

/// Milliseconds until the next whole minute, always in `[0, 60000)`.
pub fn millis_until_next_minute(now: DateTime<Utc>) -> u64 {
    let into_minute =
        u64::from(now.second()) * 1_000 + u64::from(now.nanosecond() / 1_000_000).min(999);
    (60_000 - into_minute) % 60_000
}
