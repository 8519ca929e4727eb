//! Derived grid data: geometry, per-cell contents, the now line, the
//! pinned header band and slot summaries.

pub mod cells;
pub mod geometry;
pub mod now;
pub mod sticky;
pub mod summary;

pub use cells::{derive_grid, GridCell, GridModel, RowData, RowStatus, TimezoneRow};
pub use geometry::{
    cell_for_position, grid_pixel_width, orientation_for, pixels_for_slot, CellHit, GridPoint,
    Orientation,
};
pub use now::{now_indicator, NowIndicator};
pub use sticky::{sticky_header_band, StickyBand};
pub use summary::{build_summary, TimeSummary};
