// Settings module
// User-editable configuration, read from settings.toml

use serde::{Deserialize, Serialize};

use crate::models::scheduler::WorkHours;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemePreference,
    pub work_hour_start: u32,
    pub work_hour_end: u32,
    /// Below this viewport width a portrait window switches to the vertical grid
    pub vertical_breakpoint: f32,
    /// Long-axis size of one hour cell in points
    pub cell_size: f32,
    /// Cross-axis size of one timezone row (or column, when vertical)
    pub row_size: f32,
    pub hold_threshold_ms: u64,
    pub scroll_cancel_distance: f32,
    pub resize_debounce_ms: u64,
    pub search_result_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            work_hour_start: 8,
            work_hour_end: 17,
            vertical_breakpoint: 768.0,
            cell_size: 56.0,
            row_size: 64.0,
            hold_threshold_ms: 300,
            scroll_cancel_distance: 10.0,
            resize_debounce_ms: 200,
            search_result_limit: 12,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        WorkHours::new(self.work_hour_start, self.work_hour_end).map_err(|e| e.to_string())?;

        if !(self.cell_size.is_finite() && self.cell_size >= 8.0) {
            return Err(format!("cell_size must be at least 8, got {}", self.cell_size));
        }
        if !(self.row_size.is_finite() && self.row_size >= 16.0) {
            return Err(format!("row_size must be at least 16, got {}", self.row_size));
        }
        if !(self.vertical_breakpoint.is_finite() && self.vertical_breakpoint > 0.0) {
            return Err("vertical_breakpoint must be positive".to_string());
        }
        if self.scroll_cancel_distance < 0.0 {
            return Err("scroll_cancel_distance must not be negative".to_string());
        }
        if self.search_result_limit == 0 {
            return Err("search_result_limit must be at least 1".to_string());
        }

        Ok(())
    }

    /// Work-hour window; falls back to the default window if invalid.
    pub fn work_hours(&self) -> WorkHours {
        WorkHours::new(self.work_hour_start, self.work_hour_end).unwrap_or_default()
    }
}
