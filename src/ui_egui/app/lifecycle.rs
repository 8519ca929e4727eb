use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::Utc;
use directories::ProjectDirs;

use super::sidebar::SearchState;
use super::toast::ToastManager;
use super::TimezoneGridApp;
use crate::services::app_state::AppState;
use crate::services::catalog::TimezoneCatalog;
use crate::services::grid::{build_summary, derive_grid, now_indicator};
use crate::services::interaction::{InteractionController, Intent, MinuteTicker};
use crate::services::persistence::{JsonFileStore, KeyValueStore, MemoryStore, PersistenceAdapter};
use crate::services::settings::SettingsService;
use crate::services::time::ChronoTzTimeService;
use crate::ui_egui::dialogs::summary_dialog::{render_summary_dialog, SummaryDialogAction};
use crate::ui_egui::theme::GridTheme;
use crate::ui_egui::views::grid_view::GridView;
use crate::ui_egui::DEFAULT_WINDOW_SIZE;
use crate::utils::date::today_local;

const STORE_FILE: &str = "timezones.json";

impl TimezoneGridApp {
    /// `launch_query` is the share link the app was started with, if any.
    pub fn new(cc: &eframe::CreationContext<'_>, launch_query: Option<String>) -> Self {
        let settings_service = SettingsService::from_environment();
        let settings = settings_service.load_or_default();

        let theme = GridTheme::for_preference(settings.theme);
        theme.apply_to_context(&cc.egui_ctx);

        let persistence = PersistenceAdapter::new(open_timezone_store(), launch_query.as_deref());
        let state = AppState::load(persistence, today_local(), settings.work_hours());

        let grid_dirty = Rc::new(Cell::new(true));
        let listener = {
            let dirty = Rc::clone(&grid_dirty);
            let ctx = cc.egui_ctx.clone();
            state.subscribe(move |_| {
                dirty.set(true);
                ctx.request_repaint();
            })
        };

        let time = ChronoTzTimeService::new();
        let snapshot = state.snapshot();
        let grid = derive_grid(&snapshot, &time);
        let controller =
            InteractionController::new(&settings, DEFAULT_WINDOW_SIZE[0], DEFAULT_WINDOW_SIZE[1]);

        let mut minute_ticker = MinuteTicker::default();
        minute_ticker.start(Instant::now(), Utc::now());

        log::info!(
            "Timezone grid ready with {} timezone(s), share link: {}",
            snapshot.timezones.len(),
            state.share_query()
        );

        Self {
            state,
            grid_dirty,
            listener,
            time,
            catalog: TimezoneCatalog::new(),
            settings,
            settings_service,
            theme,
            controller,
            snapshot,
            grid,
            summary: None,
            now_indicator: None,
            minute_ticker,
            search: SearchState::default(),
            toasts: ToastManager::new(),
            last_viewport: None,
            layout: None,
        }
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.track_viewport(ctx, now);
        self.handle_keyboard_shortcuts(ctx);

        if self.grid_dirty.replace(false) {
            self.refresh_derived();
        }
        if self.minute_ticker.poll(now, Utc::now()) {
            log::debug!("Minute boundary, refreshing now line");
            self.refresh_now_indicator();
        }

        self.render_toolbar(ctx);
        self.render_sidebar(ctx);

        let mut intents = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let output = GridView {
                grid: &self.grid,
                selected_slot: self.snapshot.selected_slot,
                now_indicator: self.now_indicator,
                theme: &self.theme,
                cell_size: self.settings.cell_size,
                row_size: self.settings.row_size,
            }
            .show(ui, &mut self.controller, now);
            self.layout = Some(output.layout);
            intents = output.intents;
        });
        self.apply_intents(intents);

        self.render_summary(ctx);
        self.toasts.render(ctx, self.theme.is_dark);

        self.schedule_repaint(ctx, now);
    }

    pub(super) fn handle_exit(&mut self) {
        self.state.unsubscribe(self.listener);
        log::info!("Shutting down with share link {}", self.state.share_query());
    }

    pub(super) fn apply_intents(&mut self, intents: Vec<Intent>) {
        for intent in intents {
            if let Intent::OrientationChanged(orientation) = intent {
                log::info!("Grid re-laid out as {:?}", orientation);
            }
            intent.apply(&self.state);
        }
    }

    /// Re-derives everything the frame paints from the latest snapshot.
    fn refresh_derived(&mut self) {
        self.snapshot = self.state.snapshot();
        self.grid = derive_grid(&self.snapshot, &self.time);
        self.summary = self
            .snapshot
            .selected_slot
            .and_then(|slot| build_summary(&self.snapshot, &self.grid, &self.time, slot));
        self.refresh_now_indicator();
    }

    fn refresh_now_indicator(&mut self) {
        self.now_indicator = now_indicator(&self.snapshot, &self.grid, &self.time, Utc::now());
    }

    fn track_viewport(&mut self, ctx: &egui::Context, now: Instant) {
        let size = ctx.screen_rect().size();
        if self.last_viewport != Some(size) {
            self.last_viewport = Some(size);
            self.controller.viewport_resized(size.x, size.y, now);
        }
    }

    fn render_summary(&mut self, ctx: &egui::Context) {
        let Some(summary) = &self.summary else {
            return;
        };

        match render_summary_dialog(ctx, summary, &self.theme) {
            Some(SummaryDialogAction::CopyText) => {
                ctx.output_mut(|out| out.copied_text = summary.to_text());
                self.toasts.success("Summary copied");
            }
            Some(SummaryDialogAction::CopyHtml) => {
                ctx.output_mut(|out| out.copied_text = summary.to_html());
                self.toasts.success("Summary copied as HTML");
            }
            Some(SummaryDialogAction::Dismiss) => self.state.set_selected_slot(None),
            None => {}
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let wake = [
            self.controller.next_wake(now),
            self.minute_ticker.next_wake(now),
        ]
        .into_iter()
        .flatten()
        .min();

        if let Some(wait) = wake {
            ctx.request_repaint_after(wait.min(Duration::from_secs(60)));
        }
    }
}

fn open_timezone_store() -> Box<dyn KeyValueStore> {
    let Some(path) = resolve_store_path() else {
        log::warn!("Unable to resolve data directory; timezones will not survive restart");
        return Box::new(MemoryStore::new());
    };

    match JsonFileStore::open(path.clone()) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("Starting with an empty timezone store: {:#}", err);
            Box::new(JsonFileStore::empty(path))
        }
    }
}

fn resolve_store_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "TimezoneGrid", "TimezoneGrid")
        .map(|dirs| dirs.data_dir().join(STORE_FILE))
}
