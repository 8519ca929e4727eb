mod app;
pub mod dialogs;
pub mod theme;
mod views;

pub use app::TimezoneGridApp;

/// Initial window size in points, also the viewport the first orientation
/// is computed for.
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1180.0, 760.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [360.0, 480.0];
