//! Scheduling engine integration.
//!
//! Provides functionality for:
//! - Running the external engine executable on a rendered workload
//! - Reading previously saved engine reports from disk
//! - The background task that serves UI commands and publishes results
//!
//! The engine itself (the scheduling simulation) is an external program; this
//! module only feeds it input and collects its report.

pub mod runner;
pub mod task;

pub use runner::{load_saved_report, run_engine};
pub use task::engine_task;
