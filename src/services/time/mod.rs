//! Wall-clock lookups for IANA timezone identifiers.
//!
//! The grid never does timezone arithmetic itself; it asks a [`TimeService`]
//! for local fields and offsets. [`ChronoTzTimeService`] backs it with the
//! `chrono-tz` database.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::{OffsetName, Tz};

use crate::models::error::SchedulerError;

/// Local view of an instant in one timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTime {
    pub local: NaiveDateTime,
    pub offset_minutes: i32,
    pub abbreviation: String,
}

impl ZoneTime {
    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    /// `HH:MM`
    pub fn time_label(&self) -> String {
        self.local.format("%H:%M").to_string()
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TimeService {
    fn zone_time(
        &self,
        timezone_id: &str,
        instant: DateTime<Utc>,
    ) -> Result<ZoneTime, SchedulerError>;

    /// Instant of local midnight on `date`, or the first valid local time
    /// when midnight falls into a DST gap.
    fn start_of_day(
        &self,
        timezone_id: &str,
        date: NaiveDate,
    ) -> Result<DateTime<Utc>, SchedulerError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzTimeService;

impl ChronoTzTimeService {
    pub fn new() -> Self {
        Self
    }

    pub fn is_known(&self, timezone_id: &str) -> bool {
        parse_zone(timezone_id).is_ok()
    }
}

fn parse_zone(timezone_id: &str) -> Result<Tz, SchedulerError> {
    timezone_id
        .trim()
        .parse::<Tz>()
        .map_err(|_| SchedulerError::UnknownTimezoneIdentifier(timezone_id.to_string()))
}

impl TimeService for ChronoTzTimeService {
    fn zone_time(
        &self,
        timezone_id: &str,
        instant: DateTime<Utc>,
    ) -> Result<ZoneTime, SchedulerError> {
        let tz = parse_zone(timezone_id)?;
        let local = instant.with_timezone(&tz);
        let offset = local.offset();

        Ok(ZoneTime {
            local: local.naive_local(),
            offset_minutes: offset.fix().local_minus_utc() / 60,
            abbreviation: offset.abbreviation().to_string(),
        })
    }

    fn start_of_day(
        &self,
        timezone_id: &str,
        date: NaiveDate,
    ) -> Result<DateTime<Utc>, SchedulerError> {
        let tz = parse_zone(timezone_id)?;
        let midnight = date.and_time(NaiveTime::MIN);

        // Gaps are at most a few hours; walk forward to the first valid minute.
        (0..=240)
            .find_map(|minute| {
                tz.from_local_datetime(&(midnight + Duration::minutes(minute)))
                    .earliest()
            })
            .map(|start| start.with_timezone(&Utc))
            .ok_or_else(|| SchedulerError::UnknownTimezoneIdentifier(timezone_id.to_string()))
    }
}

/// Formats a signed minute difference as an hour offset: `±0`, `+9`, `-4`,
/// `+5:30`.
pub fn relative_offset_label(diff_minutes: i32) -> String {
    if diff_minutes == 0 {
        return "±0".to_string();
    }

    let sign = if diff_minutes > 0 { '+' } else { '-' };
    let magnitude = diff_minutes.unsigned_abs();
    let hours = magnitude / 60;
    let minutes = magnitude % 60;

    if minutes == 0 {
        format!("{}{}", sign, hours)
    } else {
        format!("{}{}:{:02}", sign, hours, minutes)
    }
}

/// Absolute UTC offset label, e.g. `UTC+5:30`.
pub fn utc_offset_label(offset_minutes: i32) -> String {
    if offset_minutes == 0 {
        "UTC".to_string()
    } else {
        format!("UTC{}", relative_offset_label(offset_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, "±0")]
    #[test_case(540, "+9")]
    #[test_case(-240, "-4")]
    #[test_case(330, "+5:30")]
    #[test_case(-570, "-9:30")]
    #[test_case(825, "+13:45")]
    fn test_relative_offset_label(minutes: i32, expected: &str) {
        assert_eq!(relative_offset_label(minutes), expected);
    }

    #[test]
    fn test_zone_time_for_tokyo() {
        let service = ChronoTzTimeService::new();
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let zone = service.zone_time("Asia/Tokyo", instant).unwrap();

        assert_eq!(zone.offset_minutes, 540);
        assert_eq!(zone.abbreviation, "JST");
        assert_eq!(zone.time_label(), "09:00");
    }

    #[test]
    fn test_zone_time_tracks_dst() {
        let service = ChronoTzTimeService::new();
        let winter = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap();

        assert_eq!(service.zone_time("America/New_York", winter).unwrap().offset_minutes, -300);
        assert_eq!(service.zone_time("America/New_York", summer).unwrap().offset_minutes, -240);
    }

    #[test]
    fn test_unknown_zone_is_reported() {
        let service = ChronoTzTimeService::new();
        let err = service.zone_time("Mars/Olympus_Mons", Utc::now()).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::UnknownTimezoneIdentifier("Mars/Olympus_Mons".to_string())
        );
        assert!(!service.is_known("Mars/Olympus_Mons"));
        assert!(service.is_known("Europe/London"));
    }

    #[test]
    fn test_start_of_day_is_local_midnight() {
        let service = ChronoTzTimeService::new();
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        let start = service.start_of_day("Asia/Tokyo", date).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 12, 24, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_day_skips_midnight_gap() {
        // Santiago springs forward at local midnight: 00:00 does not exist.
        let service = ChronoTzTimeService::new();
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let start = service.start_of_day("America/Santiago", date).unwrap();
        let local = service.zone_time("America/Santiago", start).unwrap();
        assert_eq!(local.date(), date);
        assert_eq!(local.hour(), 1);
    }
}
