use eframe::egui;
use embassy_executor::{Executor, Spawner};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::thread;

use crate::config::AppConfig;
use crate::ui::{AppState, UICommand, UIRefreshState};

mod analytics;
mod config;
mod engine;
mod presentation;
mod report;
mod ui;
mod workload;

const UI_REFRESH_QUEUE_SIZE: usize = 16;
type UIRefreshQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, UIRefreshState, UI_REFRESH_QUEUE_SIZE>;
pub type UIRefreshQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, UIRefreshState, UI_REFRESH_QUEUE_SIZE>;
pub type UIRefreshQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, UIRefreshState, UI_REFRESH_QUEUE_SIZE>;

const UI_COMMAND_QUEUE_SIZE: usize = 4;
type UICommandQueue = embassy_sync::channel::Channel<CriticalSectionRawMutex, UICommand, UI_COMMAND_QUEUE_SIZE>;
pub type UICommandQueueReceiver = embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, UICommand, UI_COMMAND_QUEUE_SIZE>;
pub type UICommandQueueSender = embassy_sync::channel::Sender<'static, CriticalSectionRawMutex, UICommand, UI_COMMAND_QUEUE_SIZE>;

fn embassy_init(spawner: Spawner, config: AppConfig, ui_refresh_tx: UIRefreshQueueSender, ui_command_rx: UICommandQueueReceiver) {
    let _ = spawner.spawn(engine::engine_task(config, ui_refresh_tx, ui_command_rx));
}

fn main() {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("cpu_scheduling_visualizer"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let (config, config_error) = match AppConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("{:#}", e);
            (AppConfig::default(), Some(format!("Configuration error, using defaults: {:#}", e)))
        }
    };

    let ui_refresh_queue: &'static UIRefreshQueue = Box::leak(Box::new(UIRefreshQueue::new()));
    let ui_command_queue: &'static UICommandQueue = Box::leak(Box::new(UICommandQueue::new()));

    let ui_refresh_tx = ui_refresh_queue.sender();
    let ui_refresh_rx = ui_refresh_queue.receiver();
    let ui_command_tx = ui_command_queue.sender();
    let ui_command_rx = ui_command_queue.receiver();

    // Engine work runs on its own executor thread so the UI never blocks on it
    let engine_config = config.clone();
    let _embassy_handle = thread::Builder::new()
        .name("engine-executor".to_string())
        .spawn(move || {
            // Leak the executor to satisfy the 'static lifetime required by run()
            let executor: &'static mut Executor = Box::leak(Box::new(Executor::new()));
            executor.run(|spawner| embassy_init(spawner, engine_config, ui_refresh_tx, ui_command_rx));
        })
        .expect("failed to spawn engine executor thread");

    // Start the GUI on the main thread (required on macOS)
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 900.0]),
        ..Default::default()
    };
    let result = eframe::run_native(
        "CPU Scheduling Algorithms Visualizer",
        native_options,
        Box::new(move |cc| {
            let mut app = AppState::new(ui_refresh_rx, ui_command_tx, config, cc.storage);
            app.alert = config_error;
            Ok(Box::new(app))
        }),
    );
    if let Err(e) = result {
        log::error!("UI terminated with error: {}", e);
    }
}
