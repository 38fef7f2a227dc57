//! # Workload Panel - Simulation Input
//!
//! This module renders the left side panel where the user builds a workload:
//! - Report mode (timeline trace or statistics)
//! - Algorithm selection, with the quantum field for Round Robin
//! - Last instant and process count
//! - Per-process arrival and service times
//!
//! It also holds `WorkloadForm`, the editable (and persisted) form state, and
//! turns it into a validated `Workload` for the engine.

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, LAST_INSTANT_RANGE, PROCESS_COUNT_RANGE};
use crate::ui::AppState;
use crate::workload::{AlgorithmId, AlgorithmRequest, Process, ReportMode, Workload, WorkloadError};

/// Arrival and service time of one form row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    pub arrival_time: u32,
    pub service_time: u32,
}

/// Editable workload form.
///
/// Always keeps `PROCESS_COUNT_RANGE.end()` process rows so that shrinking and
/// growing the process count does not lose entered values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadForm {
    pub mode: ReportMode,
    /// Selection flags in `AlgorithmId::ALL` order.
    pub selected: Vec<bool>,
    pub quantum: u32,
    pub last_instant: u32,
    pub process_count: usize,
    pub processes: Vec<ProcessRow>,
}

impl WorkloadForm {
    /// Build the initial form from the configured defaults.
    pub fn from_config(config: &AppConfig) -> Self {
        let initial = config.initial_algorithms().unwrap_or_else(|e| {
            log::warn!("Ignoring default-algorithms: {}", e);
            Vec::new()
        });

        let selected = AlgorithmId::ALL
            .iter()
            .map(|id| initial.iter().any(|request| request.id() == *id))
            .collect();
        let quantum = initial
            .iter()
            .find_map(AlgorithmRequest::quantum)
            .unwrap_or(config.default_quantum);

        Self {
            mode: ReportMode::default(),
            selected,
            quantum,
            last_instant: config.default_last_instant,
            process_count: config.default_process_count,
            processes: default_process_rows(),
        }
    }

    /// Repair a form restored from storage written by another version.
    pub fn normalized(mut self, config: &AppConfig) -> Self {
        self.selected.resize(AlgorithmId::ALL.len(), false);
        if self.processes.len() != *PROCESS_COUNT_RANGE.end() {
            self.processes = default_process_rows();
        }
        self.process_count = self.process_count.clamp(*PROCESS_COUNT_RANGE.start(), *PROCESS_COUNT_RANGE.end());
        self.last_instant = self.last_instant.clamp(*LAST_INSTANT_RANGE.start(), *LAST_INSTANT_RANGE.end());
        if self.quantum == 0 {
            self.quantum = config.default_quantum;
        }
        self
    }

    pub fn reset_processes(&mut self) {
        self.processes = default_process_rows();
    }

    /// Selected algorithms in engine code order.
    pub fn selected_requests(&self) -> Result<Vec<AlgorithmRequest>, WorkloadError> {
        AlgorithmId::ALL
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| AlgorithmRequest::new(*id, id.is_quantum_based().then_some(self.quantum)))
            .collect()
    }

    /// Build and validate the workload described by the form.
    pub fn build(&self) -> Result<Workload, WorkloadError> {
        let processes = self
            .processes
            .iter()
            .take(self.process_count)
            .enumerate()
            .map(|(i, row)| Process::new(&process_name(i), row.arrival_time, row.service_time))
            .collect::<Result<Vec<_>, _>>()?;

        let workload = Workload {
            mode: self.mode,
            algorithms: self.selected_requests()?,
            last_instant: self.last_instant,
            processes,
        };
        workload.validate()?;
        Ok(workload)
    }
}

/// Name of the process in row `index`: `A`, `B`, ...
pub fn process_name(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

fn default_process_rows() -> Vec<ProcessRow> {
    (0..*PROCESS_COUNT_RANGE.end() as u32)
        .map(|i| ProcessRow {
            arrival_time: i * 2,
            service_time: 3 + i % 3,
        })
        .collect()
}

/// Render the left workload panel.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state holding the form
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("workload_left").exact_width(320.0).show(ctx, |ui| {
        ui.heading("Simulation Parameters");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            render_mode(ui, state);
            ui.add_space(8.0);
            render_algorithms(ui, state);
            ui.add_space(8.0);
            render_timeline_settings(ui, state);
            ui.add_space(8.0);
            render_processes(ui, state);
            ui.add_space(12.0);
            ui.separator();
            render_actions(ui, state);
        });
    });
}

fn render_mode(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Output mode:");
        egui::ComboBox::from_id_salt("report_mode_selector")
            .selected_text(mode_label(state.form.mode))
            .show_ui(ui, |ui| {
                for mode in [ReportMode::Trace, ReportMode::Stats] {
                    ui.selectable_value(&mut state.form.mode, mode, mode_label(mode));
                }
            });
    });
}

fn mode_label(mode: ReportMode) -> &'static str {
    match mode {
        ReportMode::Trace => "Timeline (trace)",
        ReportMode::Stats => "Statistics (stats)",
    }
}

fn render_algorithms(ui: &mut egui::Ui, state: &mut AppState) {
    ui.strong("Algorithms");
    for (index, id) in AlgorithmId::ALL.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.checkbox(&mut state.form.selected[index], id.display_name())
                .on_hover_text(id.description());
            if id.is_quantum_based() && state.form.selected[index] {
                ui.label("Quantum:");
                ui.add(egui::DragValue::new(&mut state.form.quantum).range(1..=100));
            }
        });
    }
}

fn render_timeline_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Last instant:");
        ui.add(egui::Slider::new(&mut state.form.last_instant, LAST_INSTANT_RANGE));
    });
    ui.horizontal(|ui| {
        ui.label("Processes:");
        ui.add(egui::Slider::new(&mut state.form.process_count, PROCESS_COUNT_RANGE));
    });
}

fn render_processes(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.strong("Process details");
        if ui.small_button("Reset").clicked() {
            state.form.reset_processes();
        }
    });

    egui::Grid::new("process_grid").num_columns(3).striped(true).show(ui, |ui| {
        ui.label("Process");
        ui.label("Arrival");
        ui.label("Service");
        ui.end_row();

        let count = state.form.process_count;
        for (i, row) in state.form.processes.iter_mut().take(count).enumerate() {
            ui.label(process_name(i));
            ui.add(egui::DragValue::new(&mut row.arrival_time).range(0..=100));
            ui.add(egui::DragValue::new(&mut row.service_time).range(1..=20));
            ui.end_row();
        }
    });
}

fn render_actions(ui: &mut egui::Ui, state: &mut AppState) {
    let workload = state.form.build();
    if let Err(e) = &workload {
        ui.colored_label(egui::Color32::from_rgb(255, 120, 80), e.to_string());
    }

    ui.horizontal(|ui| {
        let can_run = workload.is_ok() && !state.running;
        if ui.add_enabled(can_run, egui::Button::new("Run Simulation")).clicked() {
            state.start_simulation();
        }
        if state.running {
            ui.spinner();
        }
    });

    if ui
        .add_enabled(!state.running, egui::Button::new("Load saved report..."))
        .on_hover_text("Interpret a saved engine report against the selected algorithms and mode")
        .clicked()
    {
        state.open_report_picker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_matches_config() {
        let form = WorkloadForm::from_config(&AppConfig::default());
        assert_eq!(form.process_count, 5);
        assert_eq!(form.last_instant, 20);
        assert_eq!(form.quantum, 4);
        assert_eq!(form.selected, vec![true, false, false, false, false, false, false, false]);
        assert_eq!(form.processes[0], ProcessRow { arrival_time: 0, service_time: 3 });
        assert_eq!(form.processes[4], ProcessRow { arrival_time: 8, service_time: 4 });
        assert_eq!(form.processes.len(), 10);
    }

    #[test]
    fn test_quantum_seeded_from_default_algorithms() {
        let config = AppConfig {
            default_algorithms: "2-7,3".to_string(),
            ..AppConfig::default()
        };
        let form = WorkloadForm::from_config(&config);
        assert_eq!(form.quantum, 7);
        assert!(form.selected[1] && form.selected[2]);
        assert!(!form.selected[0]);
    }

    #[test]
    fn test_build_workload() {
        let mut form = WorkloadForm::from_config(&AppConfig::default());
        form.selected[1] = true;
        form.process_count = 3;
        form.mode = ReportMode::Stats;

        let workload = form.build().unwrap();
        assert_eq!(workload.mode, ReportMode::Stats);
        assert_eq!(workload.processes.len(), 3);
        assert_eq!(workload.processes[2].name(), "C");
        assert_eq!(workload.processes[2].arrival_time(), 4);
        assert_eq!(workload.processes[2].service_time(), 5);
        assert_eq!(workload.algorithms.len(), 2);
        assert_eq!(workload.algorithms[1].quantum(), Some(4));
    }

    #[test]
    fn test_build_rejects_empty_selection_and_zero_service() {
        let mut form = WorkloadForm::from_config(&AppConfig::default());
        form.selected = vec![false; 8];
        assert!(form.build().is_err());

        let mut form = WorkloadForm::from_config(&AppConfig::default());
        form.processes[1].service_time = 0;
        assert!(form.build().is_err());
    }

    #[test]
    fn test_normalized_repairs_restored_form() {
        let config = AppConfig::default();
        let mut form = WorkloadForm::from_config(&config);
        form.selected.truncate(3);
        form.processes.truncate(2);
        form.process_count = 40;
        form.quantum = 0;

        let form = form.normalized(&config);
        assert_eq!(form.selected.len(), 8);
        assert_eq!(form.processes.len(), 10);
        assert_eq!(form.process_count, 10);
        assert_eq!(form.quantum, 4);
    }
}
