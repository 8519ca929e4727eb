//! Theme module for the egui grid.
//!
//! Defines the `GridTheme` palette and resolves the configured preference,
//! following the desktop setting when the preference is `system`.

use egui::Color32;

use crate::models::settings::ThemePreference;

/// Every color the grid and its panels paint with.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    pub app_background: Color32,
    pub header_background: Color32,

    /// Cell fill inside the work-hour window
    pub work_hour_fill: Color32,
    /// Cell fill outside the work-hour window
    pub off_hour_fill: Color32,
    /// Accent stripe on the reference row
    pub reference_accent: Color32,
    pub grid_line: Color32,

    pub hover_line: Color32,
    pub now_line: Color32,
    pub selection_fill: Color32,
    pub date_marker: Color32,
    pub error_fill: Color32,
    pub error_text: Color32,

    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl GridTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            header_background: Color32::from_rgb(235, 238, 243),
            work_hour_fill: Color32::from_rgb(223, 240, 226),
            off_hour_fill: Color32::from_rgb(255, 255, 255),
            reference_accent: Color32::from_rgb(100, 150, 255),
            grid_line: Color32::from_rgb(220, 220, 220),
            hover_line: Color32::from_rgb(40, 110, 220),
            now_line: Color32::from_rgb(255, 100, 100),
            selection_fill: Color32::from_rgba_unmultiplied(100, 150, 255, 70),
            date_marker: Color32::from_rgb(150, 100, 0),
            error_fill: Color32::from_rgb(255, 220, 220),
            error_text: Color32::from_rgb(180, 40, 40),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            header_background: Color32::from_rgb(45, 48, 55),
            work_hour_fill: Color32::from_rgb(38, 64, 46),
            off_hour_fill: Color32::from_rgb(40, 40, 40),
            reference_accent: Color32::from_rgb(100, 150, 255),
            grid_line: Color32::from_rgb(60, 60, 60),
            hover_line: Color32::from_rgb(110, 170, 255),
            now_line: Color32::from_rgb(255, 110, 110),
            selection_fill: Color32::from_rgba_unmultiplied(100, 150, 255, 60),
            date_marker: Color32::from_rgb(255, 200, 80),
            error_fill: Color32::from_rgb(80, 30, 30),
            error_text: Color32::from_rgb(255, 120, 120),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    /// `system` asks the desktop; an undetermined answer means light.
    pub fn for_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Light => Self::light(),
            ThemePreference::Dark => Self::dark(),
            ThemePreference::System => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light | dark_light::Mode::Default => Self::light(),
            },
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.extreme_bg_color = self.off_hour_fill;
        visuals.selection.bg_fill = self.reference_accent;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_preferences() {
        assert!(!GridTheme::for_preference(ThemePreference::Light).is_dark);
        assert!(GridTheme::for_preference(ThemePreference::Dark).is_dark);
    }

    #[test]
    fn test_work_hours_stand_out_from_off_hours() {
        for theme in [GridTheme::light(), GridTheme::dark()] {
            assert_ne!(theme.work_hour_fill, theme.off_hour_fill);
            assert_ne!(theme.hover_line, theme.now_line);
        }
    }
}
