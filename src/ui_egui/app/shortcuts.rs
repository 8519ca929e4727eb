use super::TimezoneGridApp;
use crate::services::interaction::KeyInput;
use crate::utils::date::today_local;

impl TimezoneGridApp {
    pub(super) fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        // Typing in the search box owns the keyboard.
        if ctx.memory(|mem| mem.focused().is_some()) {
            return;
        }

        let mut keys = Vec::new();
        let mut shift_days = 0;
        let mut jump_today = false;

        ctx.input(|i| {
            if i.modifiers.ctrl {
                if i.key_pressed(egui::Key::ArrowLeft) {
                    shift_days -= 1;
                }
                if i.key_pressed(egui::Key::ArrowRight) {
                    shift_days += 1;
                }
                if i.key_pressed(egui::Key::T) {
                    jump_today = true;
                }
                return;
            }

            let bindings = [
                (egui::Key::ArrowLeft, KeyInput::ArrowLeft),
                (egui::Key::ArrowRight, KeyInput::ArrowRight),
                (egui::Key::ArrowUp, KeyInput::ArrowUp),
                (egui::Key::ArrowDown, KeyInput::ArrowDown),
                (egui::Key::Enter, KeyInput::Activate),
                (egui::Key::Space, KeyInput::Activate),
                (egui::Key::Escape, KeyInput::Dismiss),
            ];
            for (key, input) in bindings {
                if i.key_pressed(key) {
                    keys.push(input);
                }
            }
        });

        if shift_days != 0 {
            self.state.shift_selected_date(shift_days);
        }
        if jump_today {
            self.state.reset_to_today(today_local());
        }

        let Some(layout) = self.layout else {
            return;
        };
        let intents: Vec<_> = keys
            .into_iter()
            .filter_map(|key| self.controller.key_pressed(&layout, key))
            .collect();
        self.apply_intents(intents);
    }
}
