// Test fixtures - reusable test data
// Provides consistent states and layouts across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use timezone_grid::models::scheduler::WorkHours;
use timezone_grid::services::app_state::AppState;
use timezone_grid::services::grid::{GridPoint, Orientation};
use timezone_grid::services::interaction::GridLayout;
use timezone_grid::services::persistence::{MemoryStore, PersistenceAdapter};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns Jan 15, 2026 (northern winter, no DST transitions nearby)
    pub fn mid_january_2026() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    /// Returns Dec 25, 2026
    pub fn christmas_2026() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()
    }
}

/// Builds an AppState over an in-memory store. The returned store shares
/// its map with the one AppState owns.
pub fn app_state(store: MemoryStore, launch_query: Option<&str>, today: NaiveDate) -> AppState {
    let persistence = PersistenceAdapter::new(Box::new(store), launch_query);
    AppState::load(persistence, today, WorkHours::new(9, 17).unwrap())
}

pub fn empty_app_state(today: NaiveDate) -> AppState {
    app_state(MemoryStore::new(), None, today)
}

/// Horizontal grid at the screen origin: 56px hour cells, 64px rows.
pub fn horizontal_layout(row_count: usize) -> GridLayout {
    GridLayout {
        orientation: Orientation::Horizontal,
        origin: GridPoint::new(0.0, 0.0),
        cell_size: 56.0,
        row_size: 64.0,
        row_count,
    }
}

/// Pointer inside row `row` at `hour` plus `fraction` of a cell.
pub fn pointer_at(layout: &GridLayout, row: usize, hour: u32, fraction: f32) -> GridPoint {
    let along = (hour as f32 + fraction) * layout.cell_size;
    let across = (row as f32 + 0.5) * layout.row_size;
    match layout.orientation {
        Orientation::Horizontal => GridPoint::new(along, across),
        Orientation::Vertical => GridPoint::new(across, along),
    }
}
