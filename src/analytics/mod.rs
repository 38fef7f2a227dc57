//! Comparative analytics over interpreted statistics runs.

pub mod comparison;

pub use comparison::{ComparisonRow, ComparisonSummary, compare_runs};
