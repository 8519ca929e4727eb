//! Brief feedback messages ("Link copied", "Already tracked").
//!
//! Toasts are non-blocking and fade out on their own.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

const TOAST_DURATION: Duration = Duration::from_millis(2500);
const FADE: Duration = Duration::from_millis(400);
const TOAST_WIDTH: f32 = 260.0;
const TOAST_HEIGHT: f32 = 40.0;
const MARGIN: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    fn icon(self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Error => "✗",
        }
    }

    fn color(self, is_dark: bool) -> Color32 {
        match (self, is_dark) {
            (ToastLevel::Success, true) => Color32::from_rgb(100, 220, 120),
            (ToastLevel::Success, false) => Color32::from_rgb(30, 120, 50),
            (ToastLevel::Info, true) => Color32::from_rgb(100, 180, 255),
            (ToastLevel::Info, false) => Color32::from_rgb(30, 80, 150),
            (ToastLevel::Error, true) => Color32::from_rgb(255, 120, 120),
            (ToastLevel::Error, false) => Color32::from_rgb(180, 40, 40),
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    level: ToastLevel,
    created_at: Instant,
}

impl Toast {
    /// 1.0 while fresh, fading to 0.0 over the last few hundred ms.
    fn opacity(&self, now: Instant) -> f32 {
        let left = TOAST_DURATION.saturating_sub(now.duration_since(self.created_at));
        (left.as_secs_f32() / FADE.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Success);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Info);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Error);
    }

    fn push(&mut self, message: String, level: ToastLevel) {
        log::debug!("Toast: {}", message);
        self.toasts.push(Toast {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    /// Stacks toasts upward from the bottom-right corner.
    pub fn render(&mut self, ctx: &Context, is_dark: bool) {
        let now = Instant::now();
        self.toasts.retain(|toast| toast.opacity(now) > 0.0);
        if self.toasts.is_empty() {
            return;
        }
        ctx.request_repaint();

        let screen = ctx.screen_rect();
        let background = if is_dark {
            Color32::from_rgb(40, 40, 44)
        } else {
            Color32::from_rgb(250, 250, 250)
        };

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity(now);
            let accent = toast.level.color(is_dark).gamma_multiply(opacity);
            let pos = Pos2::new(
                screen.right() - TOAST_WIDTH - MARGIN,
                screen.bottom() - (TOAST_HEIGHT + MARGIN) * (i as f32 + 1.0),
            );

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::none()
                        .fill(background.gamma_multiply(opacity))
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, accent))
                        .show(ui, |ui| {
                            ui.set_min_width(TOAST_WIDTH - 24.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(accent).strong());
                                ui.label(RichText::new(&toast.message).color(accent));
                            });
                        });
                });
        }
    }
}
