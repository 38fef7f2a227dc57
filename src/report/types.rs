//! Parsed report entities.

use crate::workload::AlgorithmRequest;

/// A maximal span of time units during which one process held the processor.
///
/// `start` is inclusive, `end` exclusive, and `end > start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionInterval {
    pub process_name: String,
    pub start: u32,
    pub end: u32,
}

impl ExecutionInterval {
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }
}

/// One process row of a trace block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTimeline {
    pub process_name: String,
    /// Number of time units in this row's marker sequence.
    pub length: u32,
    /// Busy intervals, non-overlapping and sorted by start.
    pub intervals: Vec<ExecutionInterval>,
}

impl ProcessTimeline {
    /// Total busy time units.
    pub fn busy_time(&self) -> u32 {
        self.intervals.iter().map(ExecutionInterval::duration).sum()
    }

    /// Re-encode the intervals as a marker string of `length` characters.
    pub fn to_markers(&self, busy: char, idle: char) -> String {
        let mut markers = vec![idle; self.length as usize];
        for interval in &self.intervals {
            for slot in &mut markers[interval.start as usize..interval.end as usize] {
                *slot = busy;
            }
        }
        markers.into_iter().collect()
    }
}

/// Parsed trace-format run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRun {
    /// Longest timeline length across all process rows.
    pub horizon: u32,
    /// Process rows in report order.
    pub timelines: Vec<ProcessTimeline>,
}

impl TraceRun {
    pub fn intervals(&self) -> impl Iterator<Item = &ExecutionInterval> {
        self.timelines.iter().flat_map(|timeline| timeline.intervals.iter())
    }

    /// Processes that never held the processor (data-quality flag).
    pub fn idle_processes(&self) -> Vec<&str> {
        self.timelines
            .iter()
            .filter(|timeline| timeline.intervals.is_empty())
            .map(|timeline| timeline.process_name.as_str())
            .collect()
    }
}

/// One process row of a stats block.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStatRow {
    pub process_name: String,
    pub arrival_time: u32,
    pub service_time: u32,
    pub finish_time: u32,
    pub turnaround_time: u32,
    pub normalized_turnaround: f64,
}

/// Parsed stats-format run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRun {
    pub rows: Vec<ProcessStatRow>,
    pub mean_turnaround: f64,
    pub mean_normalized_turnaround: f64,
}

impl StatsRun {
    /// Time at which the last process finished.
    pub fn total_completion_time(&self) -> u32 {
        self.rows.iter().map(|row| row.finish_time).max().unwrap_or(0)
    }
}

/// Payload of a parsed run, depending on the report mode.
#[derive(Debug, Clone, PartialEq)]
pub enum RunData {
    Trace(TraceRun),
    Stats(StatsRun),
}

/// A successfully interpreted algorithm section.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmRun {
    pub request: AlgorithmRequest,
    /// Display name, including the quantum for quantum-based policies.
    pub display_name: String,
    pub data: RunData,
}

impl AlgorithmRun {
    pub fn as_stats(&self) -> Option<&StatsRun> {
        match &self.data {
            RunData::Stats(stats) => Some(stats),
            RunData::Trace(_) => None,
        }
    }

    pub fn as_trace(&self) -> Option<&TraceRun> {
        match &self.data {
            RunData::Trace(trace) => Some(trace),
            RunData::Stats(_) => None,
        }
    }
}
