//! # Results Panel - Interpreted Report View
//!
//! This module renders the central panel. Before any run it previews the
//! engine input and describes the selected algorithms. Once a report is
//! available it shows, per requested algorithm:
//! - A Gantt timeline (trace mode) or a statistics table (stats mode)
//! - Diagnostics for sections that failed to parse, with the raw text
//! - The raw section text in a collapsible block
//!
//! followed by the cross-algorithm comparison in stats mode.

use eframe::egui;
use egui::Color32;

use crate::presentation::{comparison_view, stats_table, timeline_chart};
use crate::report::{ReportError, RunOutcome};
use crate::ui::{AppState, CompletedRun, ReportSource, statistics_view, timeline_view};
use crate::workload::{AlgorithmId, render_engine_input};

const ERROR_COLOR: Color32 = Color32::from_rgb(255, 90, 90);
const WARNING_COLOR: Color32 = Color32::from_rgb(255, 190, 60);

/// Render the central results panel.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Application state holding the form and the latest report
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("CPU Scheduling Algorithms Visualizer");
        ui.separator();

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            if state.running {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Running simulation...");
                });
                ui.add_space(8.0);
            }

            match &state.completed {
                Some(completed) => render_completed(ui, completed),
                None => render_preview(ui, state),
            }
        });
    });
}

/// Engine input preview and algorithm descriptions shown before the first run.
fn render_preview(ui: &mut egui::Ui, state: &AppState) {
    ui.strong("Engine input preview");
    match state.form.build() {
        Ok(workload) => {
            ui.add(
                egui::TextEdit::multiline(&mut render_engine_input(&workload).as_str())
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        }
        Err(e) => {
            ui.colored_label(WARNING_COLOR, e.to_string());
        }
    }
    ui.label(format!("Engine: {}", state.config.engine_path));

    ui.add_space(12.0);
    ui.strong("Algorithms");
    for (id, selected) in AlgorithmId::ALL.iter().zip(&state.form.selected) {
        if *selected {
            egui::CollapsingHeader::new(id.display_name())
                .default_open(false)
                .show(ui, |ui| {
                    ui.label(id.description());
                });
        }
    }
}

fn render_completed(ui: &mut egui::Ui, completed: &CompletedRun) {
    let report = &completed.report;
    let source = match &completed.source {
        ReportSource::Engine => "engine run".to_string(),
        ReportSource::SavedFile(path) => format!("saved report {}", path),
    };
    ui.label(format!(
        "Completed at {} ({}, {} mode, {} ok, {} failed)",
        report.completed_at.format("%Y-%m-%d %H:%M:%S"),
        source,
        report.mode,
        report.outcomes.len() - report.failed_count(),
        report.failed_count()
    ));

    if let Some(err) = &report.batch_error {
        ui.add_space(6.0);
        ui.colored_label(WARNING_COLOR, err.to_string());
        for missing in report.missing_requests(&completed.workload.algorithms) {
            ui.colored_label(WARNING_COLOR, format!("No output for {}", missing.display_name()));
        }
    }

    for (index, outcome) in report.outcomes.iter().enumerate() {
        ui.add_space(12.0);
        ui.push_id(index, |ui| render_outcome(ui, outcome));
    }

    if let Some(summary) = &report.comparison {
        ui.add_space(16.0);
        statistics_view::render_comparison(ui, &comparison_view(summary));
    }

    ui.add_space(12.0);
    egui::CollapsingHeader::new("Engine input").default_open(false).show(ui, |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut completed.engine_input.as_str())
                .code_editor()
                .desired_width(f32::INFINITY),
        );
    });
}

fn render_outcome(ui: &mut egui::Ui, outcome: &RunOutcome) {
    ui.heading(&outcome.display_name);
    ui.separator();

    for warning in &outcome.warnings {
        ui.colored_label(WARNING_COLOR, warning.to_string());
    }

    match &outcome.result {
        Ok(run) => {
            if let Some(chart) = timeline_chart(run) {
                timeline_view::render(ui, &chart);
                if let Some(trace) = run.as_trace() {
                    let idle = trace.idle_processes();
                    if !idle.is_empty() {
                        ui.colored_label(WARNING_COLOR, format!("Never executed: {}", idle.join(", ")));
                    }
                }
            }
            if let Some(table) = stats_table(run) {
                statistics_view::render_stats_table(ui, &table);
            }
        }
        Err(err) => render_diagnostics(ui, err),
    }

    egui::CollapsingHeader::new("Raw output").default_open(false).show(ui, |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut outcome.raw_block.as_str())
                .code_editor()
                .desired_width(f32::INFINITY),
        );
    });
}

fn render_diagnostics(ui: &mut egui::Ui, err: &ReportError) {
    ui.colored_label(ERROR_COLOR, err.to_string());
    if let Some(mut raw) = err.raw_text() {
        ui.label("Offending text:");
        ui.add(
            egui::TextEdit::multiline(&mut raw)
                .code_editor()
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
    }
}
