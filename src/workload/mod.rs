//! Workload model: the processes and scheduling policies of one simulation request.
//!
//! Provides:
//! - Value objects for processes and algorithm requests
//! - Validation of a complete workload before it reaches the engine
//! - Rendering of the engine's textual input format

pub mod input;
pub mod types;

pub use input::{parse_algorithm_list, render_engine_input};
pub use types::{AlgorithmId, AlgorithmRequest, Process, ReportMode, Workload, WorkloadError};
