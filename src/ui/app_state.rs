//! # Application State Management
//!
//! This module implements the central `AppState` struct which manages all UI state
//! and coordinates the rendering of all UI components. It implements the `eframe::App`
//! trait to integrate with the egui application framework.
//!
//! ## Responsibilities
//!
//! - Holds the workload form and the most recent interpreted report
//! - Processes incoming messages from the engine task via `ui_refresh_rx`
//! - Sends run and load commands to the engine task via `ui_command_tx`
//! - Coordinates rendering of the workload panel and the results view
//! - Persists user settings (last report directory, last workload form) across sessions
//!
//! Results themselves are never persisted.

use eframe::egui;
use serde::{Deserialize, Serialize};

use super::workload_panel::WorkloadForm;
use super::{CompletedRun, UICommand, UIRefreshState};
use crate::config::AppConfig;
use crate::workload::Workload;

/// Central application state.
pub struct AppState {
    /// Optional alert message to display in a modal dialog.
    pub alert: Option<String>,
    /// Receiver for UI refresh messages from the engine task.
    pub ui_refresh_rx: crate::UIRefreshQueueReceiver,
    /// Sender for commands from the UI to the engine task.
    pub ui_command_tx: crate::UICommandQueueSender,

    pub config: AppConfig,
    /// Workload being edited in the left panel.
    pub form: WorkloadForm,
    /// Whether a simulation is in flight.
    pub running: bool,
    /// Most recent report, replaced by every run or load.
    pub completed: Option<CompletedRun>,

    /// Last directory used for the saved report file picker.
    pub last_report_dir: Option<String>,
}

/// Settings persisted across application sessions.
#[derive(Default, Serialize, Deserialize)]
struct PersistedSettings {
    last_report_dir: Option<String>,
    workload_form: Option<WorkloadForm>,
}

impl AppState {
    /// Create a new AppState, loading persisted settings if available.
    ///
    /// # Parameters
    ///
    /// * `rx` - Receiver for UI refresh messages from the engine task
    /// * `tx` - Sender for commands to the engine task
    /// * `config` - Loaded application configuration
    /// * `storage` - Optional persistent storage for loading saved settings
    pub fn new(
        rx: crate::UIRefreshQueueReceiver,
        tx: crate::UICommandQueueSender,
        config: AppConfig,
        storage: Option<&dyn eframe::Storage>,
    ) -> Self {
        let persisted: PersistedSettings = storage.and_then(|s| eframe::get_value(s, "app_settings")).unwrap_or_default();

        let form = match persisted.workload_form {
            Some(form) => form.normalized(&config),
            None => WorkloadForm::from_config(&config),
        };

        Self {
            alert: None,
            ui_refresh_rx: rx,
            ui_command_tx: tx,
            config,
            form,
            running: false,
            completed: None,
            last_report_dir: persisted.last_report_dir,
        }
    }

    /// Validate the form and ask the engine task to run it.
    pub fn start_simulation(&mut self) {
        match self.form.build() {
            Ok(workload) => {
                if self.queue_command(UICommand::RunSimulation(workload)) {
                    self.running = true;
                }
            }
            Err(e) => self.alert = Some(e.to_string()),
        }
    }

    /// Open a native file picker for a saved engine report and ask the engine
    /// task to interpret it with the currently selected algorithms and mode.
    pub fn open_report_picker(&mut self) {
        let requests = match self.form.selected_requests() {
            Ok(requests) => requests,
            Err(e) => {
                self.alert = Some(e.to_string());
                return;
            }
        };

        let mut dialog = rfd::FileDialog::new().add_filter("Reports", &["txt", "log", "out"]);
        if let Some(dir) = &self.last_report_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(file) = dialog.pick_file() else {
            return;
        };
        if let Some(parent) = file.parent() {
            self.last_report_dir = Some(parent.to_string_lossy().to_string());
        }

        // Processes are not needed to interpret a saved report.
        let workload = Workload {
            mode: self.form.mode,
            algorithms: requests,
            last_instant: self.form.last_instant,
            processes: self.form.build().map(|workload| workload.processes).unwrap_or_default(),
        };

        self.queue_command(UICommand::LoadReport {
            path: file.to_string_lossy().to_string(),
            workload,
        });
    }

    /// Hand a command to the engine task; returns false if the queue is full.
    fn queue_command(&self, command: UICommand) -> bool {
        let description = command.description();
        match self.ui_command_tx.try_send(command) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("Engine task is busy, {} request dropped", description);
                false
            }
        }
    }

    fn handle_refresh(&mut self, msg: UIRefreshState) {
        match msg {
            UIRefreshState::Alert(alert_msg) => {
                self.running = false;
                self.alert = Some(alert_msg);
            }
            UIRefreshState::SimulationStarted => {
                self.running = true;
            }
            UIRefreshState::ReportReady(completed) => {
                self.running = false;
                self.completed = Some(*completed);
            }
        }
    }
}

impl eframe::App for AppState {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            last_report_dir: self.last_report_dir.clone(),
            workload_form: Some(self.form.clone()),
        };
        eframe::set_value(storage, "app_settings", &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint periodically so engine results show up without input
        ctx.request_repaint_after(std::time::Duration::from_millis(100));

        while let Ok(msg) = self.ui_refresh_rx.try_receive() {
            self.handle_refresh(msg);
        }

        if let Some(alert) = self.alert.clone() {
            egui::Window::new("Alert")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.label(alert);
                        ui.add_space(20.0);

                        if ui.button("OK").clicked() {
                            self.alert = None;
                        }
                        ui.add_space(10.0);
                    });
                });
        }

        super::workload_panel::render(ctx, self);
        super::results_panel::render(ctx, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::ReportMode;

    fn app_state() -> AppState {
        let refresh_queue: &'static crate::UIRefreshQueue = Box::leak(Box::new(crate::UIRefreshQueue::new()));
        let command_queue: &'static crate::UICommandQueue = Box::leak(Box::new(crate::UICommandQueue::new()));
        AppState::new(refresh_queue.receiver(), command_queue.sender(), AppConfig::default(), None)
    }

    fn load_command() -> UICommand {
        UICommand::LoadReport {
            path: "report.txt".to_string(),
            workload: Workload {
                mode: ReportMode::Stats,
                algorithms: Vec::new(),
                last_instant: 20,
                processes: Vec::new(),
            },
        }
    }

    #[test]
    fn test_full_command_queue_drops_request() {
        let state = app_state();
        for _ in 0..crate::UI_COMMAND_QUEUE_SIZE {
            assert!(state.queue_command(load_command()));
        }
        assert!(!state.queue_command(load_command()));
    }

    #[test]
    fn test_start_simulation_when_queue_full_stays_idle() {
        let mut state = app_state();
        for _ in 0..crate::UI_COMMAND_QUEUE_SIZE {
            assert!(state.queue_command(load_command()));
        }
        state.start_simulation();
        assert!(!state.running);

        let mut state = app_state();
        state.start_simulation();
        assert!(state.running);
    }
}
