//! Report interpretation for the scheduling engine's textual output.
//!
//! Provides functionality for:
//! - Splitting a multi-algorithm report into per-algorithm sections
//! - Reconstructing execution intervals from trace timelines
//! - Parsing per-process statistics tables
//! - Interpreting a whole batch with per-run error isolation
//!
//! All format assumptions (delimiters, busy marker, row order, column
//! exclusions) live in this module.

pub mod batch;
pub mod error;
pub mod splitter;
pub mod statistics;
pub mod trace;
pub mod types;

pub use batch::{BatchReport, RunOutcome, interpret_report};
pub use error::ReportError;
pub use types::{AlgorithmRun, ExecutionInterval, ProcessStatRow, ProcessTimeline, RunData, StatsRun, TraceRun};
