//! Painter-based Gantt chart for one trace run.
//!
//! One horizontal lane per process, time on the x axis from 0 to the run's
//! horizon. Each execution interval is a filled bar labelled `start-end`.

use eframe::egui;
use egui::{Align2, Color32, FontId, Stroke};

use crate::presentation::{PALETTE_SIZE, TimelineChart};

/// Width reserved left of the lanes for process names.
const LABEL_WIDTH: f32 = 40.0;
/// Height reserved below the lanes for the time axis.
const AXIS_HEIGHT: f32 = 24.0;
const TITLE_HEIGHT: f32 = 28.0;

/// Pastel qualitative palette, one color per lane.
const LANE_PALETTE: [Color32; PALETTE_SIZE] = [
    Color32::from_rgb(141, 211, 199),
    Color32::from_rgb(255, 255, 179),
    Color32::from_rgb(190, 186, 218),
    Color32::from_rgb(251, 128, 114),
    Color32::from_rgb(128, 177, 211),
    Color32::from_rgb(253, 180, 98),
    Color32::from_rgb(179, 222, 105),
    Color32::from_rgb(252, 205, 229),
    Color32::from_rgb(217, 217, 217),
    Color32::from_rgb(188, 128, 189),
    Color32::from_rgb(204, 235, 197),
    Color32::from_rgb(255, 237, 111),
];

pub fn lane_color(color_index: usize) -> Color32 {
    LANE_PALETTE[color_index % PALETTE_SIZE]
}

/// Render a timeline chart at its preferred height, filling the available width.
///
/// # Parameters
///
/// * `ui` - egui UI to allocate the chart in
/// * `chart` - Chart produced by the presentation adapter
pub fn render(ui: &mut egui::Ui, chart: &TimelineChart) {
    let width = ui.available_width().max(200.0);
    let (rect, _response) = ui.allocate_exact_size(egui::vec2(width, chart.preferred_height()), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
    painter.text(
        egui::pos2(rect.center().x, rect.top() + TITLE_HEIGHT / 2.0),
        Align2::CENTER_CENTER,
        &chart.title,
        FontId::proportional(16.0),
        text_color,
    );

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + LABEL_WIDTH, rect.top() + TITLE_HEIGHT),
        egui::pos2(rect.right() - 10.0, rect.bottom() - AXIS_HEIGHT),
    );
    if chart.horizon == 0 || chart.lanes.is_empty() {
        painter.text(plot.center(), Align2::CENTER_CENTER, "No execution recorded", FontId::proportional(14.0), text_color);
        return;
    }

    let time_to_x = |t: u32| egui::lerp(plot.left()..=plot.right(), t as f32 / chart.horizon as f32);
    draw_time_axis(&painter, plot, chart.horizon, &time_to_x, ui.visuals().weak_text_color());

    let lane_height = plot.height() / chart.lanes.len() as f32;
    for (i, lane) in chart.lanes.iter().enumerate() {
        let top = plot.top() + i as f32 * lane_height;
        let center_y = top + lane_height / 2.0;
        painter.text(
            egui::pos2(rect.left() + LABEL_WIDTH / 2.0, center_y),
            Align2::CENTER_CENTER,
            &lane.process,
            FontId::monospace(14.0),
            text_color,
        );

        let fill = lane_color(lane.color_index);
        let bar_height = (lane_height * 0.6).min(36.0);
        for bar in &lane.bars {
            let bar_rect = egui::Rect::from_min_max(
                egui::pos2(time_to_x(bar.start), center_y - bar_height / 2.0),
                egui::pos2(time_to_x(bar.end), center_y + bar_height / 2.0),
            );
            painter.rect_filled(bar_rect, 2.0, fill);
            painter.rect_stroke(bar_rect, 2.0, Stroke::new(1.0, Color32::from_gray(60)), egui::StrokeKind::Inside);
            painter.text(bar_rect.center(), Align2::CENTER_CENTER, &bar.label, FontId::proportional(11.0), Color32::BLACK);
        }
    }
}

/// Vertical grid line and label for every time unit (every fifth on long horizons).
fn draw_time_axis(painter: &egui::Painter, plot: egui::Rect, horizon: u32, time_to_x: &dyn Fn(u32) -> f32, color: Color32) {
    let step = if horizon > 40 { 5 } else { 1 };
    let grid_stroke = Stroke::new(0.5, color.gamma_multiply(0.4));

    for t in (0..=horizon).step_by(step) {
        let x = time_to_x(t);
        painter.line_segment([egui::pos2(x, plot.top()), egui::pos2(x, plot.bottom())], grid_stroke);
        painter.text(
            egui::pos2(x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            t.to_string(),
            FontId::proportional(11.0),
            color,
        );
    }
    painter.line_segment(
        [egui::pos2(plot.left(), plot.bottom()), egui::pos2(plot.right(), plot.bottom())],
        Stroke::new(1.0, color),
    );
}
