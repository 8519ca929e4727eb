// Unit tests for offset labels as they appear on real timezones
// Covers half-hour and quarter-hour zones and the date markers around midnight

use chrono::NaiveDate;
use test_case::test_case;
use timezone_grid::models::scheduler::SchedulerState;
use timezone_grid::models::timezone::{TrackedTimezone, TrackedTimezoneId};
use timezone_grid::services::grid::derive_grid;
use timezone_grid::services::time::ChronoTzTimeService;

fn pair(reference: &str, other: &str, date: (i32, u32, u32)) -> SchedulerState {
    SchedulerState::new(
        vec![
            TrackedTimezone::new(TrackedTimezoneId::new("ref"), "Reference", reference),
            TrackedTimezone::new(TrackedTimezoneId::new("other"), "Other", other),
        ],
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    )
}

#[test_case("Europe/London", "Asia/Kolkata", (2026, 1, 15), "+5:30" ; "half hour ahead")]
#[test_case("Europe/London", "Asia/Kathmandu", (2026, 1, 15), "+5:45" ; "quarter hour ahead")]
#[test_case("Europe/London", "America/St_Johns", (2026, 1, 15), "-3:30" ; "half hour behind")]
#[test_case("America/New_York", "Asia/Tokyo", (2026, 1, 15), "+14" ; "across the date line")]
#[test_case("America/New_York", "Asia/Tokyo", (2026, 7, 15), "+13" ; "reference in summer time")]
#[test_case("Asia/Tokyo", "Asia/Tokyo", (2026, 7, 15), "±0" ; "same zone")]
fn test_relative_offset_label(reference: &str, other: &str, date: (i32, u32, u32), expected: &str) {
    let time = ChronoTzTimeService::new();
    let grid = derive_grid(&pair(reference, other, date), &time);

    let row = grid.rows[1].data().unwrap();
    assert_eq!(row.relative_offset_label, expected);
}

#[test_case("Asia/Kolkata", "UTC+5:30" ; "positive fraction")]
#[test_case("America/New_York", "UTC-5" ; "negative whole")]
#[test_case("UTC", "UTC" ; "zero")]
fn test_utc_offset_label_in_winter(zone: &str, expected: &str) {
    let time = ChronoTzTimeService::new();
    let grid = derive_grid(&pair("Europe/London", zone, (2026, 1, 15)), &time);

    assert_eq!(grid.rows[1].data().unwrap().utc_offset_label, expected);
}

#[test]
fn test_date_marker_only_on_cells_past_midnight() {
    let time = ChronoTzTimeService::new();
    let grid = derive_grid(&pair("Europe/London", "Asia/Tokyo", (2026, 1, 15)), &time);

    let cells = &grid.rows[1].data().unwrap().cells;
    // London 14:00 is Tokyo 23:00 on the same day; 15:00 is the next day.
    assert_eq!(cells[14].date_label, None);
    assert!(cells[15].date_label.is_some());
    assert!(grid.rows[0].data().unwrap().cells.iter().all(|cell| cell.date_label.is_none()));
}
