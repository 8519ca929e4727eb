//! Query-string codec for shareable links.
//!
//! `tz` is repeatable and carries `<display name>:<timezone id>`; `date`
//! carries an ISO calendar date. Bad entries are skipped individually so one
//! typo in a shared link never drops the rest of it.

use chrono::NaiveDate;

use crate::models::error::SchedulerError;
use crate::models::timezone::TrackedTimezone;
use crate::utils::date::{format_iso_date, parse_iso_date};

pub const TZ_PARAM: &str = "tz";
pub const DATE_PARAM: &str = "date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTimezone {
    pub display_name: String,
    pub timezone_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlParams {
    /// `Some` only when at least one `tz` entry parsed.
    pub timezones: Option<Vec<UrlTimezone>>,
    pub date: Option<NaiveDate>,
    /// Entries that were dropped while parsing.
    pub skipped: Vec<SchedulerError>,
}

/// Parses a bare query (`tz=..&date=..`), a query with a leading `?`, or a
/// full URL.
pub fn parse_query(input: &str) -> UrlParams {
    let mut params = UrlParams::default();
    let query = strip_to_query(input);
    let mut timezones = Vec::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value))
        else {
            params.skipped.push(malformed(raw_key, raw_value));
            continue;
        };

        match key.as_str() {
            TZ_PARAM => match parse_tz_entry(&value) {
                Some(entry) => timezones.push(entry),
                None => params.skipped.push(malformed(&key, &value)),
            },
            DATE_PARAM => match parse_iso_date(&value) {
                Some(date) => params.date = Some(date),
                None => params.skipped.push(malformed(&key, &value)),
            },
            other => log::debug!("Ignoring unknown query parameter '{}'", other),
        }
    }

    for err in &params.skipped {
        log::warn!("Skipping URL entry: {}", err);
    }

    if !timezones.is_empty() {
        params.timezones = Some(timezones);
    }
    params
}

/// Builds the query (without `?`) for the given order and optional date.
pub fn encode_query(timezones: &[TrackedTimezone], date: Option<NaiveDate>) -> String {
    let mut parts: Vec<String> = timezones
        .iter()
        .map(|tz| {
            format!(
                "{}={}:{}",
                TZ_PARAM,
                urlencoding::encode(&tz.display_name),
                urlencoding::encode(&tz.timezone_id).replace("%2F", "/")
            )
        })
        .collect();

    if let Some(date) = date {
        parts.push(format!("{}={}", DATE_PARAM, format_iso_date(date)));
    }

    parts.join("&")
}

fn strip_to_query(input: &str) -> &str {
    let input = input.trim();
    let without_fragment = input.split('#').next().unwrap_or(input);
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => without_fragment,
    }
}

/// `+`, `%20` and literal spaces all mean a space.
fn decode_component(raw: &str) -> Option<String> {
    let plus_as_space = raw.replace('+', " ");
    urlencoding::decode(&plus_as_space)
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Ids never contain `:`, so the last one separates name from id.
fn parse_tz_entry(value: &str) -> Option<UrlTimezone> {
    let (name, id) = value.rsplit_once(':')?;
    let (name, id) = (name.trim(), id.trim());
    if name.is_empty() || id.is_empty() {
        return None;
    }
    Some(UrlTimezone {
        display_name: name.to_string(),
        timezone_id: id.to_string(),
    })
}

fn malformed(key: &str, value: &str) -> SchedulerError {
    SchedulerError::MalformedUrlParameter {
        key: key.to_string(),
        value: value.to_string(),
    }
}
