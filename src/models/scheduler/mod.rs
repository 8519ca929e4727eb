// Scheduler state module
// The single value type AppState owns and hands out as snapshots

use chrono::NaiveDate;

use crate::models::error::SchedulerError;
use crate::models::timezone::TrackedTimezone;

/// One of the four 15-minute quadrants of an hour cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum MinuteBucket {
    #[default]
    Zero,
    Fifteen,
    Thirty,
    FortyFive,
}

impl MinuteBucket {
    pub const ALL: [MinuteBucket; 4] = [
        MinuteBucket::Zero,
        MinuteBucket::Fifteen,
        MinuteBucket::Thirty,
        MinuteBucket::FortyFive,
    ];

    pub fn minutes(self) -> u32 {
        self.index() as u32 * 15
    }

    /// Quadrant index, 0..=3
    pub fn index(self) -> usize {
        match self {
            MinuteBucket::Zero => 0,
            MinuteBucket::Fifteen => 1,
            MinuteBucket::Thirty => 2,
            MinuteBucket::FortyFive => 3,
        }
    }

    /// Indices past 3 saturate at `:45`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(3)]
    }
}

/// A snapped grid position: timezone row, hour column and quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectedSlot {
    pub timezone_index: usize,
    pub hour: u32,
    pub minute_bucket: MinuteBucket,
}

impl SelectedSlot {
    pub fn new(timezone_index: usize, hour: u32, minute_bucket: MinuteBucket) -> Self {
        Self {
            timezone_index,
            hour: hour.min(23),
            minute_bucket,
        }
    }

    /// Minutes from the start of the grid day.
    pub fn minutes_from_start(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute_bucket.minutes())
    }

    /// Moves by whole quarters, clamped to `00:00..=23:45`.
    pub fn shifted_by_quarters(&self, quarters: i32) -> Self {
        let current = self.hour as i32 * 4 + self.minute_bucket.index() as i32;
        let next = (current + quarters).clamp(0, 95);
        Self {
            timezone_index: self.timezone_index,
            hour: (next / 4) as u32,
            minute_bucket: MinuteBucket::from_index((next % 4) as usize),
        }
    }
}

/// Highlighted business-hours window, `[start, end)` in local hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    start: u32,
    end: u32,
}

impl WorkHours {
    pub fn new(start: u32, end: u32) -> Result<Self, SchedulerError> {
        if start < end && end <= 24 {
            Ok(Self { start, end })
        } else {
            Err(SchedulerError::InvalidWorkHours { start, end })
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn contains(&self, local_hour: u32) -> bool {
        local_hour >= self.start && local_hour < self.end
    }
}

impl Default for WorkHours {
    fn default() -> Self {
        Self { start: 8, end: 17 }
    }
}

/// Immutable snapshot of everything the grid is derived from.
///
/// Index 0 of `timezones` is the reference timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerState {
    pub timezones: Vec<TrackedTimezone>,
    pub selected_date: NaiveDate,
    pub work_hours: WorkHours,
    pub selected_slot: Option<SelectedSlot>,
}

impl SchedulerState {
    pub fn new(timezones: Vec<TrackedTimezone>, selected_date: NaiveDate) -> Self {
        Self {
            timezones,
            selected_date,
            work_hours: WorkHours::default(),
            selected_slot: None,
        }
    }

    pub fn reference(&self) -> Option<&TrackedTimezone> {
        self.timezones.first()
    }

    pub fn is_reference(&self, index: usize) -> bool {
        index == 0 && !self.timezones.is_empty()
    }
}
