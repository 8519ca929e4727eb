//! Raw input -> intents.
//!
//! States: `Idle -> Hovering -> (DraggingReorder | HoldingTouch) -> Idle`.
//! The controller owns all transient UI state (hover, drag, touch hold,
//! keyboard cursor). It never writes [`SchedulerState`] directly; it hands
//! back [`Intent`]s for the caller to apply to [`AppState`].
//!
//! [`SchedulerState`]: crate::models::scheduler::SchedulerState

use std::time::{Duration, Instant};

use crate::models::scheduler::{MinuteBucket, SelectedSlot};
use crate::models::settings::Settings;
use crate::services::app_state::AppState;
use crate::services::grid::geometry::{
    cell_for_position, orientation_for, pixels_for_slot, timezone_index_for_position, GridPoint,
    Orientation,
};

use super::gesture::{GestureEvent, TouchGesture};
use super::reorder::ReorderDrag;
use super::timers::Debouncer;

/// Where the grid currently sits on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub orientation: Orientation,
    /// Screen position of hour 0 of row 0.
    pub origin: GridPoint,
    pub cell_size: f32,
    pub row_size: f32,
    pub row_count: usize,
}

impl GridLayout {
    /// Snapped slot under `pointer`, or `None` off the rows.
    pub fn preview_at(&self, pointer: GridPoint) -> Option<HoverPreview> {
        let timezone_index = timezone_index_for_position(
            self.orientation,
            self.origin,
            pointer,
            self.row_size,
            self.row_count,
        )?;
        let hit = cell_for_position(self.orientation, self.origin, pointer, self.cell_size);
        Some(self.preview_for(
            SelectedSlot::new(timezone_index, hit.hour_index, hit.minute_bucket),
            pointer,
        ))
    }

    pub fn preview_for(&self, slot: SelectedSlot, pointer: GridPoint) -> HoverPreview {
        HoverPreview {
            slot,
            pointer,
            line_offset: pixels_for_slot(
                self.orientation,
                slot.hour,
                slot.minute_bucket,
                self.cell_size,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPreview {
    pub slot: SelectedSlot,
    pub pointer: GridPoint,
    /// Long-axis offset of the hover line from the grid origin.
    pub line_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    Idle,
    Hovering(HoverPreview),
    DraggingReorder(ReorderDrag),
    HoldingTouch(HoverPreview),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    SelectSlot(SelectedSlot),
    ClearSelection,
    MoveTimezone { from: usize, to: usize },
    OrientationChanged(Orientation),
}

impl Intent {
    /// Orientation changes are layout-only and leave the store untouched.
    pub fn apply(self, state: &AppState) {
        match self {
            Intent::SelectSlot(slot) => state.set_selected_slot(Some(slot)),
            Intent::ClearSelection => state.set_selected_slot(None),
            Intent::MoveTimezone { from, to } => {
                if let Err(err) = state.move_timezone(from, to) {
                    log::debug!("Dropped reorder: {}", err);
                }
            }
            Intent::OrientationChanged(_) => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Activate,
    Dismiss,
}

pub struct InteractionController {
    mode: InteractionMode,
    gesture: TouchGesture,
    resize: Debouncer<(f32, f32)>,
    orientation: Orientation,
    breakpoint: f32,
    keyboard_cursor: Option<SelectedSlot>,
}

impl InteractionController {
    pub fn new(settings: &Settings, viewport_width: f32, viewport_height: f32) -> Self {
        let orientation =
            orientation_for(viewport_width, viewport_height, settings.vertical_breakpoint);
        log::info!(
            "Initial orientation {:?} for {}x{}",
            orientation,
            viewport_width,
            viewport_height
        );

        Self {
            mode: InteractionMode::Idle,
            gesture: TouchGesture::new(
                Duration::from_millis(settings.hold_threshold_ms),
                settings.scroll_cancel_distance,
            ),
            resize: Debouncer::new(Duration::from_millis(settings.resize_debounce_ms)),
            orientation,
            breakpoint: settings.vertical_breakpoint,
            keyboard_cursor: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The preview line to draw, whether it comes from a mouse or a held
    /// finger.
    pub fn preview(&self) -> Option<HoverPreview> {
        match self.mode {
            InteractionMode::Hovering(preview) | InteractionMode::HoldingTouch(preview) => {
                Some(preview)
            }
            _ => None,
        }
    }

    pub fn reorder(&self) -> Option<ReorderDrag> {
        match self.mode {
            InteractionMode::DraggingReorder(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.mode,
            InteractionMode::DraggingReorder(_) | InteractionMode::HoldingTouch(_)
        )
    }

    // Mouse

    pub fn pointer_moved(&mut self, layout: &GridLayout, pointer: GridPoint) {
        if self.is_busy() {
            return;
        }
        self.mode = match layout.preview_at(pointer) {
            Some(preview) => InteractionMode::Hovering(preview),
            None => InteractionMode::Idle,
        };
    }

    pub fn pointer_left(&mut self) {
        if let InteractionMode::Hovering(_) = self.mode {
            self.mode = InteractionMode::Idle;
        }
    }

    /// Click release on the grid without a drag.
    pub fn pointer_clicked(&mut self, layout: &GridLayout, pointer: GridPoint) -> Option<Intent> {
        if self.is_busy() {
            return None;
        }
        let preview = layout.preview_at(pointer)?;
        self.keyboard_cursor = Some(preview.slot);
        log::debug!("Selected slot {:?}", preview.slot);
        Some(Intent::SelectSlot(preview.slot))
    }

    // Reorder

    pub fn begin_reorder(&mut self, source_index: usize) {
        self.gesture.cancel();
        self.mode = InteractionMode::DraggingReorder(ReorderDrag::begin(source_index));
    }

    pub fn update_reorder(&mut self, pointer: GridPoint, handle_centers: &[f32]) {
        if let InteractionMode::DraggingReorder(drag) = &mut self.mode {
            drag.update(pointer, pointer.across(self.orientation), handle_centers);
        }
    }

    pub fn finish_reorder(&mut self) -> Option<Intent> {
        let InteractionMode::DraggingReorder(drag) = self.mode else {
            return None;
        };
        self.mode = InteractionMode::Idle;
        let (from, to) = drag.target()?;
        log::debug!("Reorder drop {} -> {}", from, to);
        Some(Intent::MoveTimezone { from, to })
    }

    pub fn cancel_reorder(&mut self) {
        if let InteractionMode::DraggingReorder(_) = self.mode {
            self.mode = InteractionMode::Idle;
        }
    }

    // Touch

    pub fn touch_started(&mut self, position: GridPoint, now: Instant) {
        if let InteractionMode::DraggingReorder(_) = self.mode {
            return;
        }
        self.mode = InteractionMode::Idle;
        self.gesture.touch_start(position, now);
    }

    /// Returns false once the gesture is a hold, so the caller can stop the
    /// scroll container from scrolling.
    pub fn touch_moved(&mut self, layout: &GridLayout, position: GridPoint, now: Instant) -> bool {
        let event = self.gesture.touch_move(position, now);
        self.apply_gesture(layout, event);
        !self.gesture.is_holding()
    }

    pub fn touch_ended(&mut self, layout: &GridLayout, now: Instant) -> Option<Intent> {
        let event = self.gesture.touch_end(now);
        let intent = match event {
            Some(GestureEvent::Tap(position)) | Some(GestureEvent::HoldReleased(position)) => {
                let preview = self.preview().or_else(|| layout.preview_at(position));
                preview.map(|preview| {
                    self.keyboard_cursor = Some(preview.slot);
                    Intent::SelectSlot(preview.slot)
                })
            }
            _ => None,
        };
        if let InteractionMode::HoldingTouch(_) = self.mode {
            self.mode = InteractionMode::Idle;
        }
        intent
    }

    pub fn touch_cancelled(&mut self) {
        self.gesture.cancel();
        if let InteractionMode::HoldingTouch(_) = self.mode {
            self.mode = InteractionMode::Idle;
        }
    }

    fn apply_gesture(&mut self, layout: &GridLayout, event: Option<GestureEvent>) {
        match event {
            Some(GestureEvent::HoldStarted(position)) | Some(GestureEvent::HoldMoved(position)) => {
                if let Some(preview) = layout.preview_at(position) {
                    self.mode = InteractionMode::HoldingTouch(preview);
                } else if let InteractionMode::HoldingTouch(mut preview) = self.mode {
                    preview.pointer = position;
                    self.mode = InteractionMode::HoldingTouch(preview);
                }
            }
            Some(GestureEvent::ScrollDetected) => {
                log::debug!("Touch classified as scroll");
                self.mode = InteractionMode::Idle;
            }
            _ => {}
        }
    }

    // Keyboard

    pub fn key_pressed(&mut self, layout: &GridLayout, key: KeyInput) -> Option<Intent> {
        if key == KeyInput::Dismiss {
            self.mode = InteractionMode::Idle;
            return Some(Intent::ClearSelection);
        }
        if layout.row_count == 0 || self.is_busy() {
            return None;
        }

        let cursor = self
            .keyboard_cursor
            .or_else(|| self.preview().map(|preview| preview.slot))
            .unwrap_or_else(|| SelectedSlot::new(0, 0, MinuteBucket::Zero));
        let cursor = SelectedSlot {
            timezone_index: cursor.timezone_index.min(layout.row_count - 1),
            ..cursor
        };

        let (along, across) = match (self.orientation, key) {
            (Orientation::Horizontal, KeyInput::ArrowLeft)
            | (Orientation::Vertical, KeyInput::ArrowUp) => (-1, 0),
            (Orientation::Horizontal, KeyInput::ArrowRight)
            | (Orientation::Vertical, KeyInput::ArrowDown) => (1, 0),
            (Orientation::Horizontal, KeyInput::ArrowUp)
            | (Orientation::Vertical, KeyInput::ArrowLeft) => (0, -1),
            (Orientation::Horizontal, KeyInput::ArrowDown)
            | (Orientation::Vertical, KeyInput::ArrowRight) => (0, 1),
            (_, KeyInput::Activate) => {
                self.keyboard_cursor = Some(cursor);
                return Some(Intent::SelectSlot(cursor));
            }
            (_, KeyInput::Dismiss) => return None,
        };

        let mut next = cursor.shifted_by_quarters(along);
        next.timezone_index = (cursor.timezone_index as i64 + across)
            .clamp(0, layout.row_count as i64 - 1) as usize;

        self.keyboard_cursor = Some(next);
        let anchor = layout.origin;
        self.mode = InteractionMode::Hovering(layout.preview_for(next, anchor));
        None
    }

    pub fn keyboard_cursor(&self) -> Option<SelectedSlot> {
        self.keyboard_cursor
    }

    // Timers and layout

    pub fn viewport_resized(&mut self, width: f32, height: f32, now: Instant) {
        self.resize.schedule((width, height), now);
    }

    /// Fires due timers: the touch-hold timer and the resize debounce.
    pub fn poll(&mut self, layout: &GridLayout, now: Instant) -> Vec<Intent> {
        let mut intents = Vec::new();

        let hold = self.gesture.poll(now);
        self.apply_gesture(layout, hold);

        if let Some((width, height)) = self.resize.poll(now) {
            let orientation = orientation_for(width, height, self.breakpoint);
            if orientation != self.orientation {
                log::info!(
                    "Orientation {:?} -> {:?} at {}x{}",
                    self.orientation,
                    orientation,
                    width,
                    height
                );
                self.orientation = orientation;
                // Previews were measured on the old axis.
                if let InteractionMode::Hovering(_) = self.mode {
                    self.mode = InteractionMode::Idle;
                }
                intents.push(Intent::OrientationChanged(orientation));
            }
        }

        intents
    }

    /// How long until some timer needs another poll.
    pub fn next_wake(&self, now: Instant) -> Option<Duration> {
        [self.gesture.next_wake(now), self.resize.next_wake(now)]
            .into_iter()
            .flatten()
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::persistence::{MemoryStore, PersistenceAdapter};
    use crate::models::scheduler::WorkHours;
    use chrono::NaiveDate;

    const MS: Duration = Duration::from_millis(1);

    fn layout(orientation: Orientation, rows: usize) -> GridLayout {
        GridLayout {
            orientation,
            origin: GridPoint::new(100.0, 50.0),
            cell_size: 40.0,
            row_size: 60.0,
            row_count: rows,
        }
    }

    fn controller() -> InteractionController {
        InteractionController::new(&Settings::default(), 1280.0, 800.0)
    }

    fn app_state(zones: &[&str]) -> AppState {
        let adapter = PersistenceAdapter::new(Box::new(MemoryStore::new()), None);
        let state = AppState::load(adapter, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(), WorkHours::default());
        for zone in zones {
            state.add_timezone(zone, "UTC").unwrap();
        }
        state
    }

    #[test]
    fn test_hover_snaps_and_positions_line() {
        let layout = layout(Orientation::Horizontal, 2);
        let mut ctl = controller();

        // Row 1, hour 3, 25% into the cell.
        ctl.pointer_moved(&layout, GridPoint::new(100.0 + 3.0 * 40.0 + 10.0, 50.0 + 70.0));
        let preview = ctl.preview().unwrap();
        assert_eq!(preview.slot, SelectedSlot::new(1, 3, MinuteBucket::Fifteen));
        assert_eq!(preview.line_offset, 3.0 * 40.0 + 10.0);

        ctl.pointer_left();
        assert_eq!(ctl.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_pointer_off_rows_is_idle() {
        let layout = layout(Orientation::Horizontal, 1);
        let mut ctl = controller();
        ctl.pointer_moved(&layout, GridPoint::new(150.0, 500.0));
        assert_eq!(ctl.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_click_selects_snapped_slot() {
        let layout = layout(Orientation::Horizontal, 2);
        let mut ctl = controller();
        let intent = ctl.pointer_clicked(&layout, GridPoint::new(100.0 + 40.0 * 9.0 + 30.0, 60.0));
        assert_eq!(intent, Some(Intent::SelectSlot(SelectedSlot::new(0, 9, MinuteBucket::FortyFive))));
    }

    #[test]
    fn test_reorder_suppresses_hover_and_emits_move() {
        let layout = layout(Orientation::Horizontal, 3);
        let mut ctl = controller();
        let centers = [80.0, 140.0, 200.0];

        ctl.begin_reorder(0);
        ctl.pointer_moved(&layout, GridPoint::new(300.0, 80.0));
        assert_eq!(ctl.preview(), None);
        assert!(ctl.pointer_clicked(&layout, GridPoint::new(300.0, 80.0)).is_none());

        ctl.update_reorder(GridPoint::new(300.0, 210.0), &centers);
        assert_eq!(ctl.finish_reorder(), Some(Intent::MoveTimezone { from: 0, to: 2 }));
        assert_eq!(ctl.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_reorder_uses_x_axis_when_vertical() {
        let mut ctl = InteractionController::new(&Settings::default(), 400.0, 800.0);
        assert_eq!(ctl.orientation(), Orientation::Vertical);

        ctl.begin_reorder(2);
        ctl.update_reorder(GridPoint::new(10.0, 500.0), &[80.0, 140.0, 200.0]);
        assert_eq!(ctl.finish_reorder(), Some(Intent::MoveTimezone { from: 2, to: 0 }));
    }

    #[test]
    fn test_touch_swipe_never_previews() {
        let layout = layout(Orientation::Horizontal, 1);
        let mut ctl = controller();
        let start = Instant::now();

        ctl.touch_started(GridPoint::new(200.0, 60.0), start);
        assert!(ctl.touch_moved(&layout, GridPoint::new(250.0, 60.0), start + 30 * MS));
        assert!(ctl.poll(&layout, start + 400 * MS).is_empty());
        assert_eq!(ctl.preview(), None);
        assert_eq!(ctl.touch_ended(&layout, start + 450 * MS), None);
    }

    #[test]
    fn test_touch_hold_previews_then_selects_on_release() {
        let layout = layout(Orientation::Horizontal, 1);
        let mut ctl = controller();
        let start = Instant::now();

        ctl.touch_started(GridPoint::new(100.0 + 40.0 * 2.0, 60.0), start);
        ctl.poll(&layout, start + 300 * MS);
        assert!(matches!(ctl.mode(), InteractionMode::HoldingTouch(_)));

        assert!(!ctl.touch_moved(&layout, GridPoint::new(100.0 + 40.0 * 5.0 + 20.0, 60.0), start + 400 * MS));
        assert_eq!(ctl.preview().unwrap().slot, SelectedSlot::new(0, 5, MinuteBucket::Thirty));

        let intent = ctl.touch_ended(&layout, start + 500 * MS);
        assert_eq!(intent, Some(Intent::SelectSlot(SelectedSlot::new(0, 5, MinuteBucket::Thirty))));
        assert_eq!(ctl.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_quick_tap_selects() {
        let layout = layout(Orientation::Horizontal, 1);
        let mut ctl = controller();
        let start = Instant::now();

        ctl.touch_started(GridPoint::new(100.0 + 40.0, 60.0), start);
        let intent = ctl.touch_ended(&layout, start + 50 * MS);
        assert_eq!(intent, Some(Intent::SelectSlot(SelectedSlot::new(0, 1, MinuteBucket::Zero))));
    }

    #[test]
    fn test_resize_is_debounced_and_reports_orientation_change() {
        let layout = layout(Orientation::Horizontal, 1);
        let mut ctl = controller();
        let start = Instant::now();

        ctl.viewport_resized(500.0, 900.0, start);
        ctl.viewport_resized(1200.0, 900.0, start + 100 * MS);
        assert!(ctl.poll(&layout, start + 250 * MS).is_empty());
        // Last size wins, and it is still horizontal.
        assert!(ctl.poll(&layout, start + 300 * MS).is_empty());

        ctl.viewport_resized(420.0, 900.0, start + 400 * MS);
        assert_eq!(
            ctl.poll(&layout, start + 600 * MS),
            vec![Intent::OrientationChanged(Orientation::Vertical)]
        );
        assert_eq!(ctl.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_keyboard_moves_cursor_and_activates() {
        let layout = layout(Orientation::Horizontal, 2);
        let mut ctl = controller();

        assert_eq!(ctl.key_pressed(&layout, KeyInput::ArrowRight), None);
        assert_eq!(ctl.key_pressed(&layout, KeyInput::ArrowDown), None);
        assert_eq!(ctl.key_pressed(&layout, KeyInput::ArrowDown), None);
        assert_eq!(
            ctl.key_pressed(&layout, KeyInput::Activate),
            Some(Intent::SelectSlot(SelectedSlot::new(1, 0, MinuteBucket::Fifteen)))
        );
        assert_eq!(ctl.key_pressed(&layout, KeyInput::Dismiss), Some(Intent::ClearSelection));
        assert_eq!(ctl.preview(), None);
    }

    #[test]
    fn test_intents_apply_to_state() {
        let state = app_state(&["A", "B", "C"]);

        Intent::MoveTimezone { from: 0, to: 2 }.apply(&state);
        let names: Vec<_> = state.snapshot().timezones.iter().map(|tz| tz.display_name.clone()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);

        Intent::MoveTimezone { from: 7, to: 0 }.apply(&state);
        assert_eq!(state.snapshot().timezones.len(), 3);

        let slot = SelectedSlot::new(1, 4, MinuteBucket::Thirty);
        Intent::SelectSlot(slot).apply(&state);
        assert_eq!(state.snapshot().selected_slot, Some(slot));
        Intent::ClearSelection.apply(&state);
        assert_eq!(state.snapshot().selected_slot, None);
    }
}
