//! Sidebar: timezone search, the tracked list and the work-hour window.

use egui::RichText;

use super::TimezoneGridApp;
use crate::services::catalog::TimezoneCandidate;
use crate::services::time::utc_offset_label;

const SIDEBAR_MIN_WIDTH: f32 = 200.0;
const SIDEBAR_DEFAULT_WIDTH: f32 = 240.0;
const SIDEBAR_MAX_WIDTH: f32 = 360.0;

#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    /// Optional label overriding the candidate's city name
    pub label: String,
    pub results: Vec<TimezoneCandidate>,
}

impl TimezoneGridApp {
    pub(super) fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("timezone_sidebar")
            .default_width(SIDEBAR_DEFAULT_WIDTH)
            .min_width(SIDEBAR_MIN_WIDTH)
            .max_width(SIDEBAR_MAX_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_search(ui);
                ui.add_space(8.0);
                ui.separator();
                self.render_tracked_list(ui);
                ui.add_space(8.0);
                ui.separator();
                self.render_work_hours(ui);
            });
    }

    fn render_search(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Add timezone").strong());

        let response = ui.add(
            egui::TextEdit::singleline(&mut self.search.query)
                .hint_text("City or zone, e.g. Tokyo"),
        );
        if response.changed() {
            self.search.results = self
                .catalog
                .search(&self.search.query, self.settings.search_result_limit);
        }
        ui.add(egui::TextEdit::singleline(&mut self.search.label).hint_text("Label (optional)"));

        let mut chosen = None;
        for candidate in &self.search.results {
            let text = format!("{}  ·  {}", candidate.display_name, candidate.timezone_id);
            if ui.selectable_label(false, text).clicked() {
                chosen = Some(candidate.clone());
            }
        }
        // Enter in the query box takes the first hit.
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            chosen = chosen.or_else(|| self.search.results.first().cloned());
        }

        if let Some(candidate) = chosen {
            self.add_candidate(candidate);
        }
    }

    fn add_candidate(&mut self, candidate: TimezoneCandidate) {
        let label = self.search.label.trim();
        let display_name = if label.is_empty() {
            candidate.display_name.as_str()
        } else {
            label
        };

        let already_tracked = self
            .snapshot
            .timezones
            .iter()
            .any(|tz| tz.same_label_and_zone(display_name, &candidate.timezone_id));
        if already_tracked {
            self.toasts.info(format!("{} is already on the grid", display_name));
            return;
        }

        match self.state.add_timezone(display_name, &candidate.timezone_id) {
            Ok(_) => {
                self.search = SearchState::default();
            }
            Err(err) => {
                log::warn!("Could not add {}: {}", candidate.timezone_id, err);
                self.toasts.error(err.to_string());
            }
        }
    }

    fn render_tracked_list(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Tracked").strong());
        if self.snapshot.timezones.is_empty() {
            ui.label(RichText::new("Nothing tracked yet").color(self.theme.text_secondary));
            return;
        }

        let mut remove = None;
        let mut promote = None;
        for (index, tz) in self.snapshot.timezones.iter().enumerate() {
            ui.horizontal(|ui| {
                let offset = self
                    .grid
                    .row(index)
                    .and_then(|row| row.data())
                    .map(|data| utc_offset_label(data.offset_minutes))
                    .unwrap_or_else(|| "?".to_string());

                let mut name = RichText::new(&tz.display_name);
                if index == 0 {
                    name = name.strong().color(self.theme.reference_accent);
                }
                ui.label(name).on_hover_text(&tz.timezone_id);
                ui.label(RichText::new(offset).small().color(self.theme.text_secondary));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").on_hover_text("Remove").clicked() {
                        remove = Some(tz.id.clone());
                    }
                    if index > 0
                        && ui
                            .small_button("★")
                            .on_hover_text("Make reference")
                            .clicked()
                    {
                        promote = Some(index);
                    }
                });
            });
        }

        if let Some(id) = remove {
            self.state.remove_timezone(&id);
        }
        if let Some(index) = promote {
            if let Err(err) = self.state.move_timezone(index, 0) {
                log::warn!("Could not promote timezone: {}", err);
            }
        }
    }

    fn render_work_hours(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Work hours").strong());

        let hours = self.snapshot.work_hours;
        let (mut start, mut end) = (hours.start(), hours.end());
        let changed = ui
            .horizontal(|ui| {
                let a = ui.add(egui::DragValue::new(&mut start).range(0..=23).suffix(":00"));
                ui.label("to");
                let b = ui.add(egui::DragValue::new(&mut end).range(1..=24).suffix(":00"));
                a.changed() || b.changed()
            })
            .inner;

        if changed && (start, end) != (hours.start(), hours.end()) {
            if let Err(err) = self.state.set_work_hours(start, end) {
                log::debug!("Rejected work hours: {}", err);
            }
        }
    }
}
