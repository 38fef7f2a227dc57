// UI module for the CPU Scheduling Algorithms Visualizer
//
// This module organizes the UI into separate components:
// - `workload_panel`: Left panel for building the workload and starting runs
// - `results_panel`: Central view with timelines, statistics and comparison
// - `timeline_view`: Painter-based Gantt chart of one trace run
// - `statistics_view`: Tables, metrics and comparison charts for stats runs
// - `app_state`: Application state management and main update loop

pub mod app_state;
pub mod results_panel;
pub mod statistics_view;
pub mod timeline_view;
pub mod workload_panel;

use crate::report::BatchReport;
use crate::workload::Workload;

pub use app_state::AppState;

/// Where a report shown in the UI came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    Engine,
    SavedFile(String),
}

/// An interpreted report together with the workload that produced it.
#[derive(Debug)]
pub struct CompletedRun {
    pub workload: Workload,
    /// Text that was (or would have been) sent to the engine.
    pub engine_input: String,
    pub report: BatchReport,
    pub source: ReportSource,
}

#[derive(Debug)]
pub enum UIRefreshState {
    Alert(String),
    SimulationStarted,
    ReportReady(Box<CompletedRun>),
}

pub enum UICommand {
    RunSimulation(Workload),
    LoadReport { path: String, workload: Workload },
}

impl UICommand {
    /// Short name used in log messages.
    pub fn description(&self) -> &'static str {
        match self {
            UICommand::RunSimulation(_) => "run",
            UICommand::LoadReport { .. } => "load report",
        }
    }
}
