// Timezone Grid Application
// Main entry point

use timezone_grid::ui_egui::{TimezoneGridApp, DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE};

fn main() -> Result<(), eframe::Error> {
    // Initialize logging
    env_logger::init();

    // Optional share link, e.g. "?tz=London:Europe/London&date=2026-12-25"
    let launch_query = std::env::args().nth(1);
    log::info!(
        "Starting Timezone Grid{}",
        launch_query
            .as_deref()
            .map(|query| format!(" from link {}", query))
            .unwrap_or_default()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Timezone Grid")
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Timezone Grid",
        options,
        Box::new(move |cc| Ok(Box::new(TimezoneGridApp::new(cc, launch_query)))),
    )
}
