//! Background task serving UI commands.
//!
//! Runs on the Embassy executor thread so that the blocking engine call never
//! stalls the UI. Each command produces exactly one terminal message for the
//! UI: either a `ReportReady` or an `Alert`.

use std::path::Path;

use crate::config::AppConfig;
use crate::report::interpret_report;
use crate::ui::{CompletedRun, ReportSource, UICommand, UIRefreshState};
use crate::workload::{Workload, render_engine_input};
use crate::{UICommandQueueReceiver, UIRefreshQueueSender};

use super::{load_saved_report, run_engine};

/// Main engine task that runs on the Embassy executor.
///
/// # Parameters
///
/// * `config` - Engine location and defaults
/// * `ui_refresh_tx` - Channel for sending UI updates
/// * `ui_command_rx` - Channel for receiving UI commands
#[embassy_executor::task]
pub async fn engine_task(config: AppConfig, ui_refresh_tx: UIRefreshQueueSender, ui_command_rx: UICommandQueueReceiver) {
    log::info!("Engine task started, engine: {}", config.engine_path);

    loop {
        let update = match ui_command_rx.receive().await {
            UICommand::RunSimulation(workload) => {
                ui_refresh_tx.send(UIRefreshState::SimulationStarted).await;
                simulate(&config, workload)
            }
            UICommand::LoadReport { path, workload } => load_report(&path, workload),
        };
        ui_refresh_tx.send(update).await;
    }
}

fn simulate(config: &AppConfig, workload: Workload) -> UIRefreshState {
    log::info!(
        "Running {} algorithm(s) over {} process(es) in {} mode",
        workload.algorithms.len(),
        workload.processes.len(),
        workload.mode
    );

    match run_engine(config, &workload) {
        Ok(raw) => completed(&raw, workload, ReportSource::Engine),
        Err(e) => {
            log::error!("Simulation failed: {:#}", e);
            UIRefreshState::Alert(format!("Simulation failed: {:#}", e))
        }
    }
}

fn load_report(path: &str, workload: Workload) -> UIRefreshState {
    if workload.algorithms.is_empty() {
        return UIRefreshState::Alert("Select the algorithms the saved report was produced with.".to_string());
    }

    match load_saved_report(Path::new(path)) {
        Ok(raw) => {
            log::info!("Loaded saved report from {}", path);
            completed(&raw, workload, ReportSource::SavedFile(path.to_string()))
        }
        Err(e) => {
            log::error!("{:#}", e);
            UIRefreshState::Alert(format!("Failed to load report: {:#}", e))
        }
    }
}

/// Interpret a raw report against the workload's requests.
fn completed(raw: &str, workload: Workload, source: ReportSource) -> UIRefreshState {
    let report = interpret_report(raw, workload.mode, &workload.algorithms);
    let engine_input = render_engine_input(&workload);
    UIRefreshState::ReportReady(Box::new(CompletedRun {
        workload,
        engine_input,
        report,
        source,
    }))
}
