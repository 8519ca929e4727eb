use egui::RichText;
use egui_extras::DatePickerButton;

use super::TimezoneGridApp;
use crate::models::settings::ThemePreference;
use crate::ui_egui::theme::GridTheme;
use crate::utils::date::{format_day_marker, today_local};

impl TimezoneGridApp {
    pub(super) fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.render_date_navigation(ui);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_picker(ui);
                    if ui
                        .button("🔗 Copy link")
                        .on_hover_text("Copy a link that reopens this grid")
                        .clicked()
                    {
                        let query = self.state.share_query();
                        ctx.output_mut(|out| out.copied_text = query);
                        self.toasts.success("Link copied");
                    }
                });
            });
        });
    }

    fn render_date_navigation(&mut self, ui: &mut egui::Ui) {
        if ui.button("◀").on_hover_text("Previous day").clicked() {
            self.state.shift_selected_date(-1);
        }

        let mut date = self.snapshot.selected_date;
        if ui
            .add(DatePickerButton::new(&mut date).id_source("grid_date"))
            .changed()
        {
            self.state.set_selected_date(date);
        }

        if ui.button("▶").on_hover_text("Next day").clicked() {
            self.state.shift_selected_date(1);
        }

        let today = today_local();
        if ui
            .add_enabled(self.snapshot.selected_date != today, egui::Button::new("Today"))
            .clicked()
        {
            self.state.reset_to_today(today);
        }

        ui.label(
            RichText::new(format_day_marker(self.snapshot.selected_date))
                .color(self.theme.text_secondary),
        );
    }

    fn render_theme_picker(&mut self, ui: &mut egui::Ui) {
        let mut preference = self.settings.theme;
        egui::ComboBox::from_id_source("theme_picker")
            .selected_text(theme_label(preference))
            .show_ui(ui, |ui| {
                for option in [ThemePreference::System, ThemePreference::Light, ThemePreference::Dark] {
                    ui.selectable_value(&mut preference, option, theme_label(option));
                }
            });

        if preference == self.settings.theme {
            return;
        }

        self.settings.theme = preference;
        self.theme = GridTheme::for_preference(preference);
        self.theme.apply_to_context(ui.ctx());
        if let Err(err) = self.settings_service.update(&self.settings) {
            log::warn!("Failed to save theme preference: {:#}", err);
            self.toasts.error("Could not save settings");
        }
    }
}

fn theme_label(preference: ThemePreference) -> &'static str {
    match preference {
        ThemePreference::System => "System theme",
        ThemePreference::Light => "Light",
        ThemePreference::Dark => "Dark",
    }
}
