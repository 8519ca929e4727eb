//! Time summary window: the selected instant in every tracked timezone.

use egui::{Grid, RichText};

use crate::services::grid::TimeSummary;
use crate::ui_egui::theme::GridTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryDialogAction {
    CopyText,
    CopyHtml,
    /// Closing the window clears the selected slot
    Dismiss,
}

pub fn render_summary_dialog(
    ctx: &egui::Context,
    summary: &TimeSummary,
    theme: &GridTheme,
) -> Option<SummaryDialogAction> {
    let mut action = None;
    let mut open = true;

    egui::Window::new(format!("🕒 {}", summary.headline()))
        .id(egui::Id::new("time_summary"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 56.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(summary.instant.format("%Y-%m-%d %H:%M UTC").to_string())
                    .small()
                    .color(theme.text_secondary),
            );
            ui.add_space(6.0);

            Grid::new("time_summary_rows")
                .num_columns(4)
                .spacing([12.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    for entry in &summary.entries {
                        let mut name = RichText::new(&entry.display_name);
                        if entry.timezone_index == summary.slot.timezone_index {
                            name = name.strong();
                        }
                        ui.label(name).on_hover_text(&entry.timezone_id);

                        match &entry.time {
                            Ok(time) => {
                                let mut clock = RichText::new(&time.local_time_label).monospace();
                                if !time.is_work_hour {
                                    clock = clock.color(theme.text_secondary);
                                }
                                ui.label(clock);
                                ui.label(format!(
                                    "{} ({})",
                                    time.abbreviation, time.relative_offset_label
                                ));
                                let mut day = RichText::new(&time.day_label);
                                if time.differs_from_reference_day {
                                    day = day.color(theme.date_marker);
                                }
                                ui.label(day);
                            }
                            Err(err) => {
                                ui.label(RichText::new(err.to_string()).color(theme.error_text));
                                ui.label("");
                                ui.label("");
                            }
                        }
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("📋 Copy text").clicked() {
                    action = Some(SummaryDialogAction::CopyText);
                }
                if ui.button("📋 Copy HTML").clicked() {
                    action = Some(SummaryDialogAction::CopyHtml);
                }
            });
        });

    if !open {
        action = Some(SummaryDialogAction::Dismiss);
    }
    action
}
