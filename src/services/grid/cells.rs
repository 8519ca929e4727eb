//! Per-cell data derived from a state snapshot.
//!
//! A [`GridModel`] is rebuilt wholesale on every notification and never
//! patched in place.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::models::error::SchedulerError;
use crate::models::scheduler::{MinuteBucket, SchedulerState, SelectedSlot, WorkHours};
use crate::models::timezone::TrackedTimezone;
use crate::services::time::{relative_offset_label, utc_offset_label, TimeService};
use crate::utils::date::format_day_marker;

use super::geometry::HOURS_PER_DAY;

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub timezone_index: usize,
    pub hour_index: u32,
    pub instant: DateTime<Utc>,
    /// Wall clock at `instant` in this row's timezone
    pub local: NaiveDateTime,
    pub local_hour_label: String,
    pub is_work_hour: bool,
    /// Set when this cell's local date differs from the reference row's
    /// date at the same instant.
    pub date_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowData {
    pub abbreviation: String,
    pub offset_minutes: i32,
    pub relative_offset_minutes: i32,
    pub relative_offset_label: String,
    pub utc_offset_label: String,
    pub cells: Vec<GridCell>,
}

/// A row whose timezone cannot be resolved keeps its place in the grid and
/// shows the error instead of disappearing.
#[derive(Debug, Clone, PartialEq)]
pub enum RowStatus {
    Ready(RowData),
    Error(SchedulerError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimezoneRow {
    pub index: usize,
    pub timezone: TrackedTimezone,
    pub status: RowStatus,
}

impl TimezoneRow {
    pub fn data(&self) -> Option<&RowData> {
        match &self.status {
            RowStatus::Ready(data) => Some(data),
            RowStatus::Error(_) => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.index == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    pub selected_date: NaiveDate,
    /// Instant of column 0: local midnight of the selected date in the
    /// reference timezone (UTC midnight when there is no usable reference).
    pub origin: DateTime<Utc>,
    pub work_hours: WorkHours,
    pub rows: Vec<TimezoneRow>,
}

impl GridModel {
    pub fn instant_for(&self, hour_index: u32, minute_bucket: MinuteBucket) -> DateTime<Utc> {
        self.origin
            + Duration::hours(i64::from(hour_index.min(23)))
            + Duration::minutes(i64::from(minute_bucket.minutes()))
    }

    /// Local `HH:MM` of `slot` in its own row, if that row resolved.
    pub fn slot_time_label(&self, slot: SelectedSlot) -> Option<String> {
        let cell = self.rows.get(slot.timezone_index)?.data()?.cells.get(slot.hour as usize)?;
        let local = cell.local + Duration::minutes(i64::from(slot.minute_bucket.minutes()));
        Some(local.format("%H:%M").to_string())
    }

    pub fn row(&self, index: usize) -> Option<&TimezoneRow> {
        self.rows.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Column origin for `state`: falls back to UTC when there is no reference
/// or its identifier is unknown.
pub fn grid_origin(state: &SchedulerState, time: &dyn TimeService) -> DateTime<Utc> {
    state
        .reference()
        .and_then(|reference| {
            time.start_of_day(&reference.timezone_id, state.selected_date)
                .map_err(|err| log::warn!("Reference row unusable, using UTC columns: {}", err))
                .ok()
        })
        .unwrap_or_else(|| utc_midnight(state.selected_date))
}

pub fn derive_grid(state: &SchedulerState, time: &dyn TimeService) -> GridModel {
    let origin = grid_origin(state, time);
    let instants: Vec<DateTime<Utc>> = (0..HOURS_PER_DAY as i64)
        .map(|hour| origin + Duration::hours(hour))
        .collect();
    let midday = origin + Duration::hours(12);

    let reference_id = state.reference().map(|tz| tz.timezone_id.as_str());
    let reference_offset = reference_id
        .and_then(|id| time.zone_time(id, midday).ok())
        .map(|zone| zone.offset_minutes)
        .unwrap_or(0);
    let reference_dates: Vec<NaiveDate> = instants
        .iter()
        .map(|instant| {
            reference_id
                .and_then(|id| time.zone_time(id, *instant).ok())
                .map(|zone| zone.date())
                .unwrap_or_else(|| instant.date_naive())
        })
        .collect();

    let rows = state
        .timezones
        .iter()
        .enumerate()
        .map(|(index, timezone)| {
            let status = derive_row(
                index,
                timezone,
                &instants,
                &reference_dates,
                midday,
                reference_offset,
                state.work_hours,
                time,
            )
            .map(RowStatus::Ready)
            .unwrap_or_else(|err| {
                log::warn!("Row {} ({}) failed: {}", index, timezone.display_name, err);
                RowStatus::Error(err)
            });

            TimezoneRow {
                index,
                timezone: timezone.clone(),
                status,
            }
        })
        .collect();

    GridModel {
        selected_date: state.selected_date,
        origin,
        work_hours: state.work_hours,
        rows,
    }
}

#[allow(clippy::too_many_arguments)]
fn derive_row(
    index: usize,
    timezone: &TrackedTimezone,
    instants: &[DateTime<Utc>],
    reference_dates: &[NaiveDate],
    midday: DateTime<Utc>,
    reference_offset: i32,
    work_hours: WorkHours,
    time: &dyn TimeService,
) -> Result<RowData, SchedulerError> {
    let zone_id = timezone.timezone_id.as_str();
    let at_midday = time.zone_time(zone_id, midday)?;

    let mut cells = Vec::with_capacity(instants.len());
    for (hour_index, (instant, reference_date)) in instants.iter().zip(reference_dates).enumerate() {
        let local = time.zone_time(zone_id, *instant)?;
        let date_label = (local.date() != *reference_date).then(|| format_day_marker(local.date()));

        cells.push(GridCell {
            timezone_index: index,
            hour_index: hour_index as u32,
            instant: *instant,
            local: local.local,
            local_hour_label: local.time_label(),
            is_work_hour: work_hours.contains(local.hour()),
            date_label,
        });
    }

    // The reference row is its own baseline, even if its offset shifts.
    let relative = if index == 0 {
        0
    } else {
        at_midday.offset_minutes - reference_offset
    };

    Ok(RowData {
        relative_offset_label: relative_offset_label(relative),
        utc_offset_label: utc_offset_label(at_midday.offset_minutes),
        abbreviation: at_midday.abbreviation,
        offset_minutes: at_midday.offset_minutes,
        relative_offset_minutes: relative,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timezone::TrackedTimezoneId;
    use crate::services::time::{ChronoTzTimeService, MockTimeService};
    use pretty_assertions::assert_eq;

    fn state(zones: &[(&str, &str)], date: (i32, u32, u32)) -> SchedulerState {
        let timezones = zones
            .iter()
            .enumerate()
            .map(|(i, (name, id))| TrackedTimezone::new(TrackedTimezoneId::new(i.to_string()), *name, *id))
            .collect();
        SchedulerState::new(timezones, NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap())
    }

    #[test]
    fn test_columns_start_at_reference_midnight() {
        let grid = derive_grid(
            &state(&[("New York", "America/New_York"), ("Tokyo", "Asia/Tokyo")], (2026, 1, 15)),
            &ChronoTzTimeService::new(),
        );

        assert_eq!(grid.origin, Utc.with_ymd_and_hms(2026, 1, 15, 5, 0, 0).unwrap());
        let ny = grid.rows[0].data().unwrap();
        let tokyo = grid.rows[1].data().unwrap();
        assert_eq!(ny.cells.len(), 24);
        assert_eq!(ny.cells[0].local_hour_label, "00:00");
        assert_eq!(tokyo.cells[0].local_hour_label, "14:00");
    }

    #[test]
    fn test_relative_offsets_against_reference() {
        let grid = derive_grid(
            &state(&[("New York", "America/New_York"), ("Tokyo", "Asia/Tokyo")], (2026, 1, 15)),
            &ChronoTzTimeService::new(),
        );

        assert_eq!(grid.rows[0].data().unwrap().relative_offset_label, "±0");
        let tokyo = grid.rows[1].data().unwrap();
        assert_eq!(tokyo.relative_offset_minutes, 540 - (-300));
        assert_eq!(tokyo.relative_offset_label, "+14");
        assert_eq!(tokyo.utc_offset_label, "UTC+9");
    }

    #[test]
    fn test_date_marker_when_local_day_differs() {
        let grid = derive_grid(
            &state(&[("New York", "America/New_York"), ("Tokyo", "Asia/Tokyo")], (2026, 1, 15)),
            &ChronoTzTimeService::new(),
        );
        let tokyo = grid.rows[1].data().unwrap();

        // NY 00:00..09:59 is Tokyo 14:00..23:59 on the same day.
        assert_eq!(tokyo.cells[9].date_label, None);
        assert_eq!(tokyo.cells[10].local_hour_label, "00:00");
        assert_eq!(tokyo.cells[10].date_label.as_deref(), Some("Fri 16 Jan"));
        assert!(grid.rows[0].data().unwrap().cells.iter().all(|c| c.date_label.is_none()));
    }

    #[test]
    fn test_slot_time_label_in_own_row() {
        let grid = derive_grid(
            &state(&[("New York", "America/New_York"), ("Kolkata", "Asia/Kolkata")], (2026, 1, 15)),
            &ChronoTzTimeService::new(),
        );

        let ny = SelectedSlot::new(0, 9, MinuteBucket::FortyFive);
        assert_eq!(grid.slot_time_label(ny).as_deref(), Some("09:45"));
        // NY 09:15 is Kolkata 19:45.
        let kolkata = SelectedSlot::new(1, 9, MinuteBucket::Fifteen);
        assert_eq!(grid.slot_time_label(kolkata).as_deref(), Some("19:45"));
        assert_eq!(grid.slot_time_label(SelectedSlot::new(5, 0, MinuteBucket::Zero)), None);
    }

    #[test]
    fn test_work_hours_use_local_time() {
        let grid = derive_grid(
            &state(&[("London", "Europe/London"), ("Tokyo", "Asia/Tokyo")], (2026, 1, 15)),
            &ChronoTzTimeService::new(),
        );
        let london = grid.rows[0].data().unwrap();
        let tokyo = grid.rows[1].data().unwrap();

        assert!(!london.cells[7].is_work_hour);
        assert!(london.cells[8].is_work_hour);
        assert!(!london.cells[17].is_work_hour);
        // London 00:00 is Tokyo 09:00.
        assert!(tokyo.cells[0].is_work_hour);
        assert!(!tokyo.cells[8].is_work_hour);
    }

    #[test]
    fn test_unknown_zone_marks_only_its_row() {
        let grid = derive_grid(
            &state(&[("London", "Europe/London"), ("Nowhere", "Mars/Base")], (2026, 1, 15)),
            &ChronoTzTimeService::new(),
        );

        assert!(grid.rows[0].data().is_some());
        assert_eq!(
            grid.rows[1].status,
            RowStatus::Error(SchedulerError::UnknownTimezoneIdentifier("Mars/Base".to_string()))
        );
    }

    #[test]
    fn test_unknown_reference_falls_back_to_utc_columns() {
        let grid = derive_grid(
            &state(&[("Nowhere", "Mars/Base"), ("Tokyo", "Asia/Tokyo")], (2026, 1, 15)),
            &ChronoTzTimeService::new(),
        );

        assert_eq!(grid.origin, Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap());
        assert!(matches!(grid.rows[0].status, RowStatus::Error(_)));
        assert_eq!(grid.rows[1].data().unwrap().relative_offset_label, "+9");
    }

    #[test]
    fn test_empty_state_has_no_rows() {
        let mut time = MockTimeService::new();
        time.expect_zone_time().never();
        time.expect_start_of_day().never();

        let grid = derive_grid(&state(&[], (2026, 1, 15)), &time);
        assert!(grid.is_empty());
        assert_eq!(grid.origin, Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_instant_for_slot() {
        let grid = derive_grid(
            &state(&[("Tokyo", "Asia/Tokyo")], (2026, 12, 25)),
            &ChronoTzTimeService::new(),
        );
        assert_eq!(
            grid.instant_for(9, MinuteBucket::FortyFive),
            Utc.with_ymd_and_hms(2026, 12, 25, 0, 45, 0).unwrap()
        );
    }
}
