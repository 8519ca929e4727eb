//! Pixel <-> slot mapping for the comparison grid.
//!
//! The long axis (x when horizontal, y when vertical) holds 24 hour cells of
//! equal size; the cross axis holds one row per timezone. Nothing here knows
//! about egui, so every rule is testable on plain numbers.

use crate::models::scheduler::MinuteBucket;

pub const HOURS_PER_DAY: usize = 24;
pub const DEFAULT_VERTICAL_BREAKPOINT: f32 = 768.0;

/// Slack in f32 ulps at the pointer's magnitude, so a position computed by
/// [`pixels_for_slot`] lands in its own bucket despite float rounding.
const SNAP_ULPS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPoint {
    pub x: f32,
    pub y: f32,
}

impl GridPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along the hour axis.
    pub fn along(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Coordinate along the timezone axis.
    pub fn across(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.y,
            Orientation::Vertical => self.x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellHit {
    pub hour_index: u32,
    pub minute_bucket: MinuteBucket,
}

/// Vertical only for a narrow window that is also portrait. A narrow
/// landscape window (a phone on its side) stays horizontal.
pub fn orientation_for(viewport_width: f32, viewport_height: f32, breakpoint: f32) -> Orientation {
    let narrow = viewport_width < breakpoint;
    let portrait = viewport_height > viewport_width;
    if narrow && portrait {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

/// Snaps a pointer to an hour cell and quarter. Positions before the grid
/// clamp to `00:00`, positions past it to `23:45`.
pub fn cell_for_position(
    orientation: Orientation,
    container_origin: GridPoint,
    pointer: GridPoint,
    cell_pixel_size: f32,
) -> CellHit {
    let offset =
        f64::from(pointer.along(orientation)) - f64::from(container_origin.along(orientation));
    let quarter_size = f64::from(cell_pixel_size) / 4.0;
    let last_quarter = (HOURS_PER_DAY * 4 - 1) as f64;
    let magnitude = pointer
        .along(orientation)
        .abs()
        .max(container_origin.along(orientation).abs())
        .max(1.0);
    let slack = f64::from(magnitude) * f64::from(f32::EPSILON) * SNAP_ULPS;

    let quarters = if quarter_size > 0.0 && offset.is_finite() {
        ((offset + slack) / quarter_size).floor().clamp(0.0, last_quarter)
    } else {
        0.0
    };
    let quarters = quarters as usize;

    CellHit {
        hour_index: (quarters / 4) as u32,
        minute_bucket: MinuteBucket::from_index(quarters % 4),
    }
}

/// Offset of a slot's leading edge from the grid origin along the long axis.
pub fn pixels_for_slot(
    _orientation: Orientation,
    hour_index: u32,
    minute_bucket: MinuteBucket,
    cell_pixel_size: f32,
) -> f32 {
    let quarters = hour_index * 4 + minute_bucket.index() as u32;
    quarters as f32 * (cell_pixel_size / 4.0)
}

/// Continuous variant used by the now indicator.
pub fn pixels_for_minutes(minutes_from_start: f32, cell_pixel_size: f32) -> f32 {
    let clamped = minutes_from_start.clamp(0.0, (HOURS_PER_DAY * 60) as f32);
    clamped / 60.0 * cell_pixel_size
}

/// Inner content length along the long axis. Fixed, so a wide window never
/// stretches the grid into trailing whitespace.
pub fn grid_pixel_width(cell_pixel_size: f32) -> f32 {
    HOURS_PER_DAY as f32 * cell_pixel_size
}

/// Which timezone row (or column) the pointer is over, if any.
pub fn timezone_index_for_position(
    orientation: Orientation,
    container_origin: GridPoint,
    pointer: GridPoint,
    row_pixel_size: f32,
    row_count: usize,
) -> Option<usize> {
    if row_pixel_size <= 0.0 {
        return None;
    }
    let offset = pointer.across(orientation) - container_origin.across(orientation);
    if offset < 0.0 {
        return None;
    }
    let index = (offset / row_pixel_size).floor() as usize;
    (index < row_count).then_some(index)
}
