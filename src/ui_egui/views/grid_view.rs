//! The timezone grid: one shared scroll area holding every row.
//!
//! Horizontal: rows stack downward, hours run left to right, names sit in a
//! label column and the header strip is an hour ruler. Vertical: timezones
//! become columns, hours run downward and the header strip holds the names.
//! Pointer, touch and handle events are forwarded to the
//! [`InteractionController`]; painting reads only the derived [`GridModel`].

use std::time::Instant;

use egui::{Align2, Color32, CursorIcon, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::models::scheduler::SelectedSlot;
use crate::services::grid::geometry::{
    grid_pixel_width, pixels_for_slot, GridPoint, Orientation, HOURS_PER_DAY,
};
use crate::services::grid::{sticky_header_band, GridModel, NowIndicator, RowStatus};
use crate::services::interaction::{GridLayout, HoverPreview, Intent, InteractionController};
use crate::ui_egui::theme::GridTheme;

const HEADER_HEIGHT: f32 = 44.0;
const LABEL_WIDTH: f32 = 160.0;
const HANDLE_SIZE: f32 = 18.0;
const EMPTY_HINT: &str = "Add a timezone from the sidebar to start comparing.";

pub struct GridView<'a> {
    pub grid: &'a GridModel,
    pub selected_slot: Option<SelectedSlot>,
    pub now_indicator: Option<NowIndicator>,
    pub theme: &'a GridTheme,
    pub cell_size: f32,
    pub row_size: f32,
}

pub struct GridViewOutput {
    pub layout: GridLayout,
    pub intents: Vec<Intent>,
}

/// Screen rectangles for one frame.
struct GridFrame {
    layout: GridLayout,
    header: Rect,
    body: Rect,
}

impl GridFrame {
    fn new(content: Rect, orientation: Orientation, cell_size: f32, row_size: f32, rows: usize) -> Self {
        let long = grid_pixel_width(cell_size);
        let cross = rows as f32 * row_size;
        let (header, body) = match orientation {
            Orientation::Horizontal => {
                let left = content.left() + LABEL_WIDTH;
                (
                    Rect::from_min_size(Pos2::new(left, content.top()), Vec2::new(long, HEADER_HEIGHT)),
                    Rect::from_min_size(
                        Pos2::new(left, content.top() + HEADER_HEIGHT),
                        Vec2::new(long, cross),
                    ),
                )
            }
            Orientation::Vertical => (
                Rect::from_min_size(content.min, Vec2::new(cross, HEADER_HEIGHT)),
                Rect::from_min_size(
                    Pos2::new(content.left(), content.top() + HEADER_HEIGHT),
                    Vec2::new(cross, long),
                ),
            ),
        };

        Self {
            layout: GridLayout {
                orientation,
                origin: GridPoint::new(body.left(), body.top()),
                cell_size,
                row_size,
                row_count: rows,
            },
            header,
            body,
        }
    }

    fn content_size(orientation: Orientation, cell_size: f32, row_size: f32, rows: usize) -> Vec2 {
        let long = grid_pixel_width(cell_size);
        let cross = rows as f32 * row_size;
        match orientation {
            Orientation::Horizontal => Vec2::new(LABEL_WIDTH + long, HEADER_HEIGHT + cross),
            Orientation::Vertical => Vec2::new(cross, HEADER_HEIGHT + long),
        }
    }

    fn orientation(&self) -> Orientation {
        self.layout.orientation
    }

    /// Rect of row `index` inside the body.
    fn row_rect(&self, index: usize) -> Rect {
        let offset = index as f32 * self.layout.row_size;
        match self.orientation() {
            Orientation::Horizontal => Rect::from_min_size(
                Pos2::new(self.body.left(), self.body.top() + offset),
                Vec2::new(self.body.width(), self.layout.row_size),
            ),
            Orientation::Vertical => Rect::from_min_size(
                Pos2::new(self.body.left() + offset, self.body.top()),
                Vec2::new(self.layout.row_size, self.body.height()),
            ),
        }
    }

    fn cell_rect(&self, index: usize, hour: usize) -> Rect {
        let row = self.row_rect(index);
        let along = hour as f32 * self.layout.cell_size;
        match self.orientation() {
            Orientation::Horizontal => Rect::from_min_size(
                Pos2::new(row.left() + along, row.top()),
                Vec2::new(self.layout.cell_size, row.height()),
            ),
            Orientation::Vertical => Rect::from_min_size(
                Pos2::new(row.left(), row.top() + along),
                Vec2::new(row.width(), self.layout.cell_size),
            ),
        }
    }

    /// Name label for a row: the label column, or the header strip.
    fn label_rect(&self, index: usize) -> Rect {
        let row = self.row_rect(index);
        match self.orientation() {
            Orientation::Horizontal => Rect::from_min_max(
                Pos2::new(row.left() - LABEL_WIDTH, row.top()),
                Pos2::new(row.left(), row.bottom()),
            ),
            Orientation::Vertical => Rect::from_min_max(
                Pos2::new(row.left(), self.header.top()),
                Pos2::new(row.right(), self.header.bottom()),
            ),
        }
    }

    fn handle_rect(&self, index: usize) -> Rect {
        let label = self.label_rect(index);
        Rect::from_center_size(
            Pos2::new(label.left() + HANDLE_SIZE * 0.5 + 2.0, label.center().y),
            Vec2::splat(HANDLE_SIZE),
        )
    }

    /// Cross-axis centre of every row's handle, in list order.
    fn handle_centers(&self) -> Vec<f32> {
        (0..self.layout.row_count)
            .map(|index| {
                let row = self.row_rect(index);
                match self.orientation() {
                    Orientation::Horizontal => row.center().y,
                    Orientation::Vertical => row.center().x,
                }
            })
            .collect()
    }

    /// A line across every row at `along` pixels from the grid origin.
    fn line_at(&self, along: f32) -> [Pos2; 2] {
        match self.orientation() {
            Orientation::Horizontal => {
                let x = self.body.left() + along;
                [Pos2::new(x, self.body.top()), Pos2::new(x, self.body.bottom())]
            }
            Orientation::Vertical => {
                let y = self.body.top() + along;
                [Pos2::new(self.body.left(), y), Pos2::new(self.body.right(), y)]
            }
        }
    }

    /// Rect covering one quarter-hour of one row.
    fn quarter_rect(&self, slot: SelectedSlot) -> Rect {
        let row = self.row_rect(slot.timezone_index);
        let along = pixels_for_slot(
            self.orientation(),
            slot.hour,
            slot.minute_bucket,
            self.layout.cell_size,
        );
        let quarter = self.layout.cell_size / 4.0;
        match self.orientation() {
            Orientation::Horizontal => Rect::from_min_size(
                Pos2::new(row.left() + along, row.top()),
                Vec2::new(quarter, row.height()),
            ),
            Orientation::Vertical => Rect::from_min_size(
                Pos2::new(row.left(), row.top() + along),
                Vec2::new(row.width(), quarter),
            ),
        }
    }

    /// Where a reorder drop line goes for `candidate` given `source`.
    fn drop_line(&self, source: usize, candidate: usize) -> [Pos2; 2] {
        let boundary = if candidate > source { candidate + 1 } else { candidate };
        let cross = boundary as f32 * self.layout.row_size;
        match self.orientation() {
            Orientation::Horizontal => {
                let y = self.body.top() + cross;
                [Pos2::new(self.body.left() - LABEL_WIDTH, y), Pos2::new(self.body.right(), y)]
            }
            Orientation::Vertical => {
                let x = self.body.left() + cross;
                [Pos2::new(x, self.header.top()), Pos2::new(x, self.body.bottom())]
            }
        }
    }
}

fn to_grid_point(pos: Pos2) -> GridPoint {
    GridPoint::new(pos.x, pos.y)
}

impl<'a> GridView<'a> {
    pub fn show(
        self,
        ui: &mut egui::Ui,
        controller: &mut InteractionController,
        now: Instant,
    ) -> GridViewOutput {
        let orientation = controller.orientation();
        let rows = self.grid.rows.len();
        let mut intents = Vec::new();

        let mut layout = GridFrame::new(
            ui.max_rect(),
            orientation,
            self.cell_size,
            self.row_size,
            rows,
        )
        .layout;

        if rows == 0 {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new(EMPTY_HINT).color(self.theme.text_secondary));
            });
            intents.extend(controller.poll(&layout, now));
            return GridViewOutput { layout, intents };
        }

        egui::ScrollArea::both()
            .id_source("timezone_grid")
            .auto_shrink([false, false])
            .drag_to_scroll(!controller.is_busy())
            .show(ui, |ui| {
                let size = GridFrame::content_size(orientation, self.cell_size, self.row_size, rows);
                let (content, background) = ui.allocate_exact_size(size, Sense::click());
                let frame = GridFrame::new(content, orientation, self.cell_size, self.row_size, rows);
                layout = frame.layout;

                let body = ui.interact(frame.body, ui.id().with("grid_body"), Sense::click());
                let had_touch = self.handle_touch(ui, &frame, controller, now, &mut intents);

                self.handle_handles(ui, &frame, controller, &mut intents);

                if !had_touch && !ui.input(|i| i.any_touches()) {
                    match body.hover_pos() {
                        Some(pos) => controller.pointer_moved(&frame.layout, to_grid_point(pos)),
                        None => controller.pointer_left(),
                    }
                    if body.clicked() {
                        if let Some(pos) = body.interact_pointer_pos() {
                            intents.extend(controller.pointer_clicked(&frame.layout, to_grid_point(pos)));
                        }
                    } else if background.clicked() && self.selected_slot.is_some() {
                        intents.push(Intent::ClearSelection);
                    }
                }

                let painter = ui.painter();
                self.paint_rows(painter, &frame);
                self.paint_header(painter, &frame, frame.header.top());
                self.paint_overlays(painter, &frame, controller);

                // Pinned copy of the header once the real one scrolls away.
                // Painted without any Sense, so input reaches the cells below.
                let viewport = ui.clip_rect();
                if let Some(band) = sticky_header_band(
                    frame.header.top(),
                    HEADER_HEIGHT,
                    frame.body.bottom(),
                    viewport.top(),
                ) {
                    let clip = Rect::from_min_max(
                        Pos2::new(viewport.left(), band.top),
                        Pos2::new(viewport.right(), band.top + band.height),
                    );
                    let sticky = painter.with_clip_rect(clip.intersect(viewport));
                    self.paint_header(&sticky, &frame, band.top);
                }
            });

        intents.extend(controller.poll(&layout, now));
        GridViewOutput { layout, intents }
    }

    /// Feeds this frame's touch events to the controller. Returns true when
    /// there were any, so the synthetic mouse events egui derives from them
    /// are not handled twice.
    fn handle_touch(
        &self,
        ui: &egui::Ui,
        frame: &GridFrame,
        controller: &mut InteractionController,
        now: Instant,
        intents: &mut Vec<Intent>,
    ) -> bool {
        let touches: Vec<(egui::TouchPhase, Pos2)> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Touch { phase, pos, .. } => Some((*phase, *pos)),
                    _ => None,
                })
                .collect()
        });

        for (phase, pos) in &touches {
            let point = to_grid_point(*pos);
            match phase {
                egui::TouchPhase::Start => {
                    if frame.body.contains(*pos) {
                        controller.touch_started(point, now);
                    }
                }
                egui::TouchPhase::Move => {
                    controller.touch_moved(&frame.layout, point, now);
                }
                egui::TouchPhase::End => {
                    intents.extend(controller.touch_ended(&frame.layout, now));
                }
                egui::TouchPhase::Cancel => controller.touch_cancelled(),
            }
        }

        !touches.is_empty()
    }

    fn handle_handles(
        &self,
        ui: &egui::Ui,
        frame: &GridFrame,
        controller: &mut InteractionController,
        intents: &mut Vec<Intent>,
    ) {
        let centers = frame.handle_centers();
        for index in 0..frame.layout.row_count {
            let response = ui.interact(
                frame.handle_rect(index),
                ui.id().with(("reorder_handle", index)),
                Sense::drag(),
            );

            if response.hovered() {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grab);
            }
            if response.drag_started() {
                log::debug!("Reorder drag from row {}", index);
                controller.begin_reorder(index);
            }
            if response.dragged() {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
                if let Some(pos) = response.interact_pointer_pos() {
                    controller.update_reorder(to_grid_point(pos), &centers);
                }
            }
            if response.drag_stopped() {
                intents.extend(controller.finish_reorder());
            }
        }
    }

    fn paint_rows(&self, painter: &Painter, frame: &GridFrame) {
        let theme = self.theme;
        let font = FontId::proportional(12.0);
        let small = FontId::proportional(10.0);

        for row in &self.grid.rows {
            let row_rect = frame.row_rect(row.index);
            let label = frame.label_rect(row.index);

            match &row.status {
                RowStatus::Ready(data) => {
                    for cell in &data.cells {
                        let rect = frame.cell_rect(row.index, cell.hour_index as usize);
                        let fill = if cell.is_work_hour {
                            theme.work_hour_fill
                        } else {
                            theme.off_hour_fill
                        };
                        painter.rect_filled(rect, 0.0, fill);
                        painter.rect_stroke(rect, 0.0, Stroke::new(0.5, theme.grid_line));
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            &cell.local_hour_label,
                            font.clone(),
                            theme.text_primary,
                        );
                        if let Some(marker) = &cell.date_label {
                            painter.text(
                                rect.center_top() + Vec2::new(0.0, 2.0),
                                Align2::CENTER_TOP,
                                marker,
                                small.clone(),
                                theme.date_marker,
                            );
                        }
                    }

                    if frame.orientation() == Orientation::Horizontal {
                        let detail = format!(
                            "{} · {} · {}",
                            data.abbreviation, data.utc_offset_label, data.relative_offset_label
                        );
                        self.paint_label(painter, label, &row.timezone.display_name, &detail, row.is_reference());
                    }
                }
                RowStatus::Error(err) => {
                    painter.rect_filled(row_rect, 0.0, theme.error_fill);
                    painter.text(
                        row_rect.center(),
                        Align2::CENTER_CENTER,
                        err.to_string(),
                        font.clone(),
                        theme.error_text,
                    );
                    if frame.orientation() == Orientation::Horizontal {
                        self.paint_label(painter, label, &row.timezone.display_name, "unavailable", false);
                    }
                }
            }

            if row.is_reference() {
                let stripe = match frame.orientation() {
                    Orientation::Horizontal => Rect::from_min_size(row_rect.min, Vec2::new(3.0, row_rect.height())),
                    Orientation::Vertical => Rect::from_min_size(row_rect.min, Vec2::new(row_rect.width(), 3.0)),
                };
                painter.rect_filled(stripe, 0.0, theme.reference_accent);
            }
        }
    }

    fn paint_label(&self, painter: &Painter, rect: Rect, name: &str, detail: &str, reference: bool) {
        let text_left = rect.left() + HANDLE_SIZE + 8.0;
        let name_color = if reference {
            self.theme.reference_accent
        } else {
            self.theme.text_primary
        };
        painter.text(
            Pos2::new(text_left, rect.center().y - 2.0),
            Align2::LEFT_BOTTOM,
            name,
            FontId::proportional(14.0),
            name_color,
        );
        painter.text(
            Pos2::new(text_left, rect.center().y + 2.0),
            Align2::LEFT_TOP,
            detail,
            FontId::proportional(11.0),
            self.theme.text_secondary,
        );
        paint_handle_glyph(painter, rect, self.theme.text_secondary);
    }

    /// Header strip with its top edge at `top`; used for the real header and
    /// for the pinned copy.
    fn paint_header(&self, painter: &Painter, frame: &GridFrame, top: f32) {
        let theme = self.theme;
        let shift = Vec2::new(0.0, top - frame.header.top());
        let header = frame.header.translate(shift);
        painter.rect_filled(header, 0.0, theme.header_background);

        match frame.orientation() {
            Orientation::Horizontal => {
                // Hour ruler in the reference timezone.
                let reference = self.grid.rows.first().and_then(|row| row.data());
                for hour in 0..HOURS_PER_DAY {
                    let x = header.left() + hour as f32 * frame.layout.cell_size;
                    let label = reference
                        .and_then(|data| data.cells.get(hour))
                        .map(|cell| cell.local_hour_label.clone())
                        .unwrap_or_else(|| format!("{:02}:00 UTC", hour));
                    painter.text(
                        Pos2::new(x + 4.0, header.center().y),
                        Align2::LEFT_CENTER,
                        label,
                        FontId::proportional(11.0),
                        theme.text_secondary,
                    );
                    painter.vline(x, header.y_range(), Stroke::new(0.5, theme.grid_line));
                }
            }
            Orientation::Vertical => {
                for row in &self.grid.rows {
                    let rect = frame.label_rect(row.index).translate(shift);
                    let detail = row
                        .data()
                        .map(|data| format!("{} {}", data.abbreviation, data.relative_offset_label))
                        .unwrap_or_else(|| "unavailable".to_string());
                    self.paint_label(painter, rect, &row.timezone.display_name, &detail, row.is_reference());
                }
            }
        }

        painter.hline(header.x_range(), header.bottom(), Stroke::new(1.0, theme.reference_accent));
    }

    fn paint_overlays(&self, painter: &Painter, frame: &GridFrame, controller: &InteractionController) {
        let theme = self.theme;

        if let Some(slot) = self.selected_slot.filter(|slot| slot.timezone_index < frame.layout.row_count) {
            painter.rect_filled(frame.quarter_rect(slot), 0.0, theme.selection_fill);
        }

        if let Some(now) = self.now_indicator {
            let line = frame.line_at(now.offset(frame.layout.cell_size));
            painter.circle_filled(line[0], 3.0, theme.now_line);
            painter.line_segment(line, Stroke::new(2.0, theme.now_line));
        }

        if let Some(preview) = controller.preview() {
            self.paint_preview(painter, frame, preview);
        }

        if let Some(drag) = controller.reorder() {
            painter.rect_filled(
                frame.row_rect(drag.source_index),
                0.0,
                theme.selection_fill,
            );
            if let Some((from, to)) = drag.target() {
                painter.line_segment(frame.drop_line(from, to), Stroke::new(3.0, theme.reference_accent));
            }
        }
    }

    fn paint_preview(&self, painter: &Painter, frame: &GridFrame, preview: HoverPreview) {
        let theme = self.theme;
        let line = frame.line_at(preview.line_offset);
        painter.line_segment(line, Stroke::new(2.0, theme.hover_line));

        let Some(row) = self.grid.row(preview.slot.timezone_index) else {
            return;
        };
        let time = self
            .grid
            .slot_time_label(preview.slot)
            .unwrap_or_else(|| "--:--".to_string());
        let text = format!("{} {}", row.timezone.display_name, time);

        let anchor = frame.quarter_rect(preview.slot).center_top();
        let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), Color32::WHITE);
        let bubble = Rect::from_center_size(
            Pos2::new(anchor.x, anchor.y + galley.size().y),
            galley.size() + Vec2::new(12.0, 6.0),
        );
        painter.rect_filled(bubble, 4.0, theme.hover_line);
        painter.galley(bubble.min + Vec2::new(6.0, 3.0), galley, Color32::WHITE);
    }
}

fn paint_handle_glyph(painter: &Painter, label: Rect, color: Color32) {
    let center = Pos2::new(label.left() + HANDLE_SIZE * 0.5 + 2.0, label.center().y);
    for dy in [-4.0, 0.0, 4.0] {
        painter.hline(
            (center.x - 5.0)..=(center.x + 5.0),
            center.y + dy,
            Stroke::new(1.5, color),
        );
    }
}
