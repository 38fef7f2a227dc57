//! Statistics tables, metric callouts and the cross-algorithm comparison.

use eframe::egui;
use egui::{Align2, Color32, FontId, Stroke};
use egui_extras::{Column, TableBuilder};

use crate::presentation::{ComparisonView, MetricCallout, STATS_COLUMNS, StatsTable};

const BAR_COLOR: Color32 = Color32::from_rgb(128, 177, 211);
const BEST_BAR_COLOR: Color32 = Color32::from_rgb(179, 222, 105);

/// Render one run's per-process table followed by its metric callouts.
pub fn render_stats_table(ui: &mut egui::Ui, table: &StatsTable) {
    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;

    ui.push_id(&table.title, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(70.0).at_least(50.0))
            .columns(Column::initial(110.0).at_least(60.0), STATS_COLUMNS.len() - 1)
            .header(row_height, |mut header| {
                for title in STATS_COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, table.rows.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });

    ui.add_space(6.0);
    render_metrics(ui, &table.metrics);
}

fn render_metrics(ui: &mut egui::Ui, metrics: &[MetricCallout]) {
    ui.columns(metrics.len().max(1), |cols| {
        for (col, metric) in cols.iter_mut().zip(metrics) {
            col.vertical(|ui| {
                ui.label(metric.label);
                ui.label(egui::RichText::new(&metric.value).heading().strong());
            });
        }
    });
}

/// Render the comparison table, the two bar charts and the insights.
pub fn render_comparison(ui: &mut egui::Ui, view: &ComparisonView) {
    ui.heading("Algorithm Comparison");
    ui.separator();

    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    ui.push_id("comparison_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .column(Column::initial(260.0).at_least(120.0))
            .columns(Column::initial(150.0).at_least(80.0), 3)
            .header(row_height, |mut header| {
                for title in ["Algorithm", "Mean Turnaround", "Mean Normalized Turnaround", "Total Completion Time"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, view.rows.len(), |mut row| {
                    let entry = &view.rows[row.index()];
                    row.col(|ui| {
                        ui.label(&entry.algorithm);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", entry.mean_turnaround));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", entry.mean_normalized_turnaround));
                    });
                    row.col(|ui| {
                        ui.label(entry.total_completion_time.to_string());
                    });
                });
            });
    });

    ui.add_space(10.0);
    ui.columns(2, |cols| {
        render_bar_chart(
            &mut cols[0],
            "Mean Turnaround Time",
            &view.turnaround_series,
            &view.best_turnaround.algorithm,
        );
        render_bar_chart(
            &mut cols[1],
            "Mean Normalized Turnaround Time",
            &view.normalized_series,
            &view.best_normalized.algorithm,
        );
    });

    ui.add_space(10.0);
    ui.strong("Insights");
    for best in [&view.best_turnaround, &view.best_normalized] {
        ui.horizontal(|ui| {
            ui.label(format!("{}:", best.label));
            ui.label(egui::RichText::new(best.text()).strong().color(Color32::from_rgb(0, 160, 80)));
        });
    }
}

/// Vertical bar chart, one bar per algorithm; the best one is highlighted.
fn render_bar_chart(ui: &mut egui::Ui, title: &str, series: &[(String, f64)], best: &str) {
    let height = 260.0;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let text_color = ui.visuals().text_color();

    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
    painter.text(
        egui::pos2(rect.center().x, rect.top() + 12.0),
        Align2::CENTER_CENTER,
        title,
        FontId::proportional(14.0),
        text_color,
    );

    let max_value = series.iter().map(|(_, value)| *value).fold(0.0_f64, f64::max);
    if series.is_empty() || max_value <= 0.0 {
        return;
    }

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + 10.0, rect.top() + 30.0),
        egui::pos2(rect.right() - 10.0, rect.bottom() - 10.0),
    );
    let slot = plot.width() / series.len() as f32;
    let mut hovered = None;

    for (i, (algorithm, value)) in series.iter().enumerate() {
        let bar_height = (value / max_value) as f32 * (plot.height() - 16.0);
        let left = plot.left() + i as f32 * slot + slot * 0.15;
        let bar = egui::Rect::from_min_max(
            egui::pos2(left, plot.bottom() - bar_height),
            egui::pos2(left + slot * 0.7, plot.bottom()),
        );
        let fill = if algorithm == best { BEST_BAR_COLOR } else { BAR_COLOR };
        painter.rect_filled(bar, 2.0, fill);
        painter.text(
            egui::pos2(bar.center().x, bar.top() - 2.0),
            Align2::CENTER_BOTTOM,
            format!("{:.2}", value),
            FontId::proportional(11.0),
            text_color,
        );

        if response.hover_pos().is_some_and(|pos| bar.contains(pos)) {
            hovered = Some(algorithm.as_str());
        }
    }
    painter.line_segment(
        [egui::pos2(plot.left(), plot.bottom()), egui::pos2(plot.right(), plot.bottom())],
        Stroke::new(1.0, ui.visuals().weak_text_color()),
    );

    if let Some(algorithm) = hovered {
        response.on_hover_text(algorithm);
    }
}
