//! Type definitions for the workload model.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Error type for workload construction and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    InvalidProcess(String),
    InvalidAlgorithm(String),
    InvalidWorkload(String),
}

impl std::fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkloadError::InvalidProcess(msg) => write!(f, "Invalid process: {}", msg),
            WorkloadError::InvalidAlgorithm(msg) => write!(f, "Invalid algorithm: {}", msg),
            WorkloadError::InvalidWorkload(msg) => write!(f, "Invalid workload: {}", msg),
        }
    }
}

impl std::error::Error for WorkloadError {}

/// Which of the two report formats the engine should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportMode {
    /// Per-time-unit execution timeline.
    #[default]
    Trace,
    /// Per-process metrics table with run-level means.
    Stats,
}

impl ReportMode {
    /// Keyword used on the first line of the engine input.
    pub fn keyword(self) -> &'static str {
        match self {
            ReportMode::Trace => "trace",
            ReportMode::Stats => "stats",
        }
    }
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// The eight scheduling policies understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmId {
    Fcfs,
    RoundRobin,
    Spn,
    Srt,
    Hrrn,
    Feedback1,
    Feedback2i,
    Aging,
}

impl AlgorithmId {
    /// All policies in engine code order.
    pub const ALL: [AlgorithmId; 8] = [
        AlgorithmId::Fcfs,
        AlgorithmId::RoundRobin,
        AlgorithmId::Spn,
        AlgorithmId::Srt,
        AlgorithmId::Hrrn,
        AlgorithmId::Feedback1,
        AlgorithmId::Feedback2i,
        AlgorithmId::Aging,
    ];

    /// Numeric code used in the engine input.
    pub fn code(self) -> u8 {
        match self {
            AlgorithmId::Fcfs => 1,
            AlgorithmId::RoundRobin => 2,
            AlgorithmId::Spn => 3,
            AlgorithmId::Srt => 4,
            AlgorithmId::Hrrn => 5,
            AlgorithmId::Feedback1 => 6,
            AlgorithmId::Feedback2i => 7,
            AlgorithmId::Aging => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        AlgorithmId::ALL.into_iter().find(|id| id.code() == code)
    }

    /// Human readable name shown in the UI.
    pub fn display_name(self) -> &'static str {
        match self {
            AlgorithmId::Fcfs => "FCFS (First Come First Serve)",
            AlgorithmId::RoundRobin => "RR (Round Robin)",
            AlgorithmId::Spn => "SPN (Shortest Process Next)",
            AlgorithmId::Srt => "SRT (Shortest Remaining Time)",
            AlgorithmId::Hrrn => "HRRN (Highest Response Ratio Next)",
            AlgorithmId::Feedback1 => "FB-1 (Feedback Queue 1)",
            AlgorithmId::Feedback2i => "FB-2i (Feedback Queue 2i)",
            AlgorithmId::Aging => "AGING (Aging Algorithm)",
        }
    }

    /// One-line description for the about section.
    pub fn description(self) -> &'static str {
        match self {
            AlgorithmId::Fcfs => "Processes are executed in the order they arrive.",
            AlgorithmId::RoundRobin => "Each process gets a fixed time quantum before being preempted.",
            AlgorithmId::Spn => "Non-preemptive; selects the process with the shortest service time.",
            AlgorithmId::Srt => "Preemptive SPN; switches to the process with the shortest remaining time.",
            AlgorithmId::Hrrn => "Selects the process with the highest (waiting + service) / service ratio.",
            AlgorithmId::Feedback1 => "Multi-level feedback queue with a quantum of 1.",
            AlgorithmId::Feedback2i => "Multi-level feedback queue with quantum 2^i at level i.",
            AlgorithmId::Aging => "Gradually raises the priority of waiting processes to prevent starvation.",
        }
    }

    /// Whether the policy takes a quantum parameter.
    pub fn is_quantum_based(self) -> bool {
        self == AlgorithmId::RoundRobin
    }
}

/// A requested scheduling policy with its optional quantum.
///
/// The quantum is present exactly when the policy is quantum-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmRequest {
    id: AlgorithmId,
    quantum: Option<u32>,
}

impl AlgorithmRequest {
    pub fn new(id: AlgorithmId, quantum: Option<u32>) -> Result<Self, WorkloadError> {
        match (id.is_quantum_based(), quantum) {
            (true, None) => Err(WorkloadError::InvalidAlgorithm(format!("{} requires a quantum", id.display_name()))),
            (true, Some(0)) => Err(WorkloadError::InvalidAlgorithm(format!("{} quantum must be positive", id.display_name()))),
            (false, Some(q)) => Err(WorkloadError::InvalidAlgorithm(format!(
                "{} does not take a quantum (got {})",
                id.display_name(),
                q
            ))),
            _ => Ok(Self { id, quantum }),
        }
    }

    pub fn id(&self) -> AlgorithmId {
        self.id
    }

    pub fn quantum(&self) -> Option<u32> {
        self.quantum
    }

    /// Token for the engine's algorithm list, e.g. `1` or `2-4`.
    pub fn engine_token(&self) -> String {
        match self.quantum {
            Some(q) => format!("{}-{}", self.id.code(), q),
            None => self.id.code().to_string(),
        }
    }

    /// Display name including the quantum for quantum-based policies.
    pub fn display_name(&self) -> String {
        display_name_with_quantum(self.id, self.quantum)
    }
}

/// Build a display name, suffixing the quantum when one applies.
pub fn display_name_with_quantum(id: AlgorithmId, quantum: Option<u32>) -> String {
    match quantum {
        Some(q) if id.is_quantum_based() => format!("{} (Quantum: {})", id.display_name(), q),
        _ => id.display_name().to_string(),
    }
}

/// A process of the workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    name: String,
    arrival_time: u32,
    service_time: u32,
}

impl Process {
    pub fn new(name: &str, arrival_time: u32, service_time: u32) -> Result<Self, WorkloadError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkloadError::InvalidProcess("process name must not be empty".to_string()));
        }
        if name.contains(|c: char| c == ',' || c == '|' || c.is_whitespace()) {
            return Err(WorkloadError::InvalidProcess(format!(
                "process name '{}' must not contain ',', '|' or whitespace",
                name
            )));
        }
        if service_time == 0 {
            return Err(WorkloadError::InvalidProcess(format!("process {} has zero service time", name)));
        }

        Ok(Self {
            name: name.to_string(),
            arrival_time,
            service_time,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_time(&self) -> u32 {
        self.arrival_time
    }

    pub fn service_time(&self) -> u32 {
        self.service_time
    }
}

/// A complete simulation request: mode, policies, timeline length and processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub mode: ReportMode,
    pub algorithms: Vec<AlgorithmRequest>,
    /// Timeline length the engine simulates ("last instant").
    pub last_instant: u32,
    pub processes: Vec<Process>,
}

impl Workload {
    /// Validate the cross-field rules that single value objects cannot check.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the workload can be sent to the engine, `Err(WorkloadError)` otherwise.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if self.algorithms.is_empty() {
            return Err(WorkloadError::InvalidWorkload("select at least one algorithm".to_string()));
        }

        let mut algorithm_ids = HashSet::new();
        for request in &self.algorithms {
            if !algorithm_ids.insert(request.id()) {
                return Err(WorkloadError::InvalidWorkload(format!(
                    "algorithm {} requested more than once",
                    request.id().display_name()
                )));
            }
        }

        if self.processes.is_empty() {
            return Err(WorkloadError::InvalidWorkload("workload must contain at least one process".to_string()));
        }

        let mut names = HashSet::new();
        for process in &self.processes {
            if !names.insert(process.name()) {
                return Err(WorkloadError::InvalidWorkload(format!("duplicate process name: {}", process.name())));
            }
        }

        if self.last_instant == 0 {
            return Err(WorkloadError::InvalidWorkload("last instant must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(name: &str, arrival: u32, service: u32) -> Process {
        Process::new(name, arrival, service).unwrap()
    }

    #[test]
    fn test_algorithm_codes_round_trip() {
        for id in AlgorithmId::ALL {
            assert_eq!(AlgorithmId::from_code(id.code()), Some(id));
        }
        assert_eq!(AlgorithmId::from_code(0), None);
        assert_eq!(AlgorithmId::from_code(9), None);
    }

    #[test]
    fn test_quantum_invariant() {
        assert!(AlgorithmRequest::new(AlgorithmId::RoundRobin, Some(4)).is_ok());
        assert!(AlgorithmRequest::new(AlgorithmId::RoundRobin, None).is_err());
        assert!(AlgorithmRequest::new(AlgorithmId::RoundRobin, Some(0)).is_err());
        assert!(AlgorithmRequest::new(AlgorithmId::Fcfs, Some(2)).is_err());
        assert!(AlgorithmRequest::new(AlgorithmId::Fcfs, None).is_ok());
    }

    #[test]
    fn test_display_name_includes_quantum() {
        let rr = AlgorithmRequest::new(AlgorithmId::RoundRobin, Some(3)).unwrap();
        assert_eq!(rr.display_name(), "RR (Round Robin) (Quantum: 3)");
        assert_eq!(rr.engine_token(), "2-3");

        let spn = AlgorithmRequest::new(AlgorithmId::Spn, None).unwrap();
        assert_eq!(spn.display_name(), "SPN (Shortest Process Next)");
        assert_eq!(spn.engine_token(), "3");
    }

    #[test]
    fn test_process_validation() {
        assert!(Process::new("A", 0, 3).is_ok());
        assert_eq!(Process::new(" B ", 1, 2).unwrap().name(), "B");
        assert!(Process::new("", 0, 3).is_err());
        assert!(Process::new("A,B", 0, 3).is_err());
        assert!(Process::new("A|", 0, 3).is_err());
        assert!(Process::new("A", 0, 0).is_err());
    }

    #[test]
    fn test_workload_validation() {
        let fcfs = AlgorithmRequest::new(AlgorithmId::Fcfs, None).unwrap();
        let mut workload = Workload {
            mode: ReportMode::Stats,
            algorithms: vec![fcfs],
            last_instant: 20,
            processes: vec![process("A", 0, 3), process("B", 2, 6)],
        };
        assert!(workload.validate().is_ok());

        workload.processes.push(process("A", 4, 1));
        assert!(matches!(workload.validate(), Err(WorkloadError::InvalidWorkload(_))));
        workload.processes.pop();

        workload.algorithms.push(fcfs);
        assert!(workload.validate().is_err());
        workload.algorithms.clear();
        assert!(workload.validate().is_err());
    }
}
