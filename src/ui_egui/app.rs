mod lifecycle;
mod shortcuts;
mod sidebar;
mod toast;
mod toolbar;

use std::cell::Cell;
use std::rc::Rc;

use self::sidebar::SearchState;
use self::toast::ToastManager;
use crate::models::scheduler::SchedulerState;
use crate::models::settings::Settings;
use crate::services::app_state::{AppState, ListenerId};
use crate::services::catalog::TimezoneCatalog;
use crate::services::grid::{GridModel, NowIndicator, TimeSummary};
use crate::services::interaction::{GridLayout, InteractionController, MinuteTicker};
use crate::services::settings::SettingsService;
use crate::services::time::ChronoTzTimeService;
use crate::ui_egui::theme::GridTheme;

pub struct TimezoneGridApp {
    /// Single owner of the scheduler state
    state: AppState,
    /// Set by the AppState listener; the next frame re-derives the grid
    grid_dirty: Rc<Cell<bool>>,
    listener: ListenerId,
    time: ChronoTzTimeService,
    catalog: TimezoneCatalog,
    settings: Settings,
    settings_service: SettingsService,
    theme: GridTheme,
    controller: InteractionController,
    /// Derived views of the latest snapshot
    snapshot: Rc<SchedulerState>,
    grid: GridModel,
    summary: Option<TimeSummary>,
    now_indicator: Option<NowIndicator>,
    minute_ticker: MinuteTicker,
    search: SearchState,
    toasts: ToastManager,
    last_viewport: Option<egui::Vec2>,
    /// Grid placement from the last frame, for keyboard input
    layout: Option<GridLayout>,
}

impl eframe::App for TimezoneGridApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.handle_exit();
    }
}
