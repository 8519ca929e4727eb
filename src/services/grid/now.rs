//! The "now" line: where it sits and whether it is shown at all.

use chrono::{DateTime, Utc};

use crate::models::scheduler::SchedulerState;
use crate::services::time::TimeService;

use super::cells::GridModel;
use super::geometry::{pixels_for_minutes, HOURS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NowIndicator {
    pub minutes_from_start: f32,
    pub hour_index: u32,
}

impl NowIndicator {
    /// Long-axis offset from the grid origin.
    pub fn offset(&self, cell_pixel_size: f32) -> f32 {
        pixels_for_minutes(self.minutes_from_start, cell_pixel_size)
    }
}

/// Present only while the selected date is today in the reference
/// timezone; any other date suppresses the line entirely.
pub fn now_indicator(
    state: &SchedulerState,
    grid: &GridModel,
    time: &dyn TimeService,
    now: DateTime<Utc>,
) -> Option<NowIndicator> {
    let reference = state.reference()?;
    let today_there = time.zone_time(&reference.timezone_id, now).ok()?.date();
    if today_there != state.selected_date {
        return None;
    }

    let elapsed_seconds = (now - grid.origin).num_seconds();
    let day_seconds = HOURS_PER_DAY as i64 * 3_600;
    if !(0..day_seconds).contains(&elapsed_seconds) {
        return None;
    }

    let minutes_from_start = elapsed_seconds as f32 / 60.0;
    Some(NowIndicator {
        minutes_from_start,
        hour_index: (elapsed_seconds / 3_600) as u32,
    })
}
