//! Interpret a full engine report: split, parse every section, compare.
//!
//! Failures are isolated per run: a malformed section never prevents the
//! following sections from being interpreted, and the comparison is computed
//! over the successful stats runs only.

use chrono::{DateTime, Local};

use super::error::ReportError;
use super::splitter::split_report;
use super::statistics::interpret_statistics;
use super::trace::interpret_trace;
use super::types::{AlgorithmRun, RunData};
use crate::analytics::{ComparisonSummary, compare_runs};
use crate::workload::types::display_name_with_quantum;
use crate::workload::{AlgorithmRequest, ReportMode};

/// Token marking the quantum in a Round Robin section title, e.g. `RR-4`.
const QUANTUM_TITLE_MARKER: &str = "RR-";

/// Interpretation result of one algorithm section.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub request: AlgorithmRequest,
    pub display_name: String,
    /// Raw section text as produced by the engine.
    pub raw_block: String,
    pub result: Result<AlgorithmRun, ReportError>,
    /// Non-fatal findings such as `QuantumInconsistency`.
    pub warnings: Vec<ReportError>,
}

/// Interpretation result of a complete report.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub mode: ReportMode,
    /// One outcome per section that could be paired with a request, in request order.
    pub outcomes: Vec<RunOutcome>,
    /// Raised once when the section count differs from the request count.
    pub batch_error: Option<ReportError>,
    /// Present when at least two stats runs parsed successfully.
    pub comparison: Option<ComparisonSummary>,
    pub completed_at: DateTime<Local>,
}

impl BatchReport {
    pub fn successful_runs(&self) -> impl Iterator<Item = &AlgorithmRun> {
        self.outcomes.iter().filter_map(|outcome| outcome.result.as_ref().ok())
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err()).count()
    }

    /// Requests that had no section in the report.
    pub fn missing_requests<'a>(&self, requests: &'a [AlgorithmRequest]) -> &'a [AlgorithmRequest] {
        &requests[self.outcomes.len().min(requests.len())..]
    }
}

/// Interpret a raw engine report against the requested algorithms.
///
/// # Parameters
///
/// * `raw` - Full engine stdout
/// * `mode` - Which report format the engine was asked for
/// * `requests` - Requested algorithms in the order passed to the engine
pub fn interpret_report(raw: &str, mode: ReportMode, requests: &[AlgorithmRequest]) -> BatchReport {
    let blocks = split_report(raw, requests);
    let batch_error = blocks.mismatch();
    if let Some(err) = &batch_error {
        log::warn!("{}", err);
    }

    let outcomes: Vec<RunOutcome> = blocks
        .paired(requests)
        .map(|(request, block)| interpret_block(block, mode, *request))
        .collect();

    let comparison = if mode == ReportMode::Stats {
        compare_runs(outcomes.iter().filter_map(|outcome| outcome.result.as_ref().ok()))
    } else {
        None
    };

    let failed = outcomes.iter().filter(|outcome| outcome.result.is_err()).count();
    log::info!(
        "Interpreted {} {} section(s): {} ok, {} failed",
        outcomes.len(),
        mode,
        outcomes.len() - failed,
        failed
    );

    BatchReport {
        mode,
        outcomes,
        batch_error,
        comparison,
        completed_at: Local::now(),
    }
}

fn interpret_block(block: &str, mode: ReportMode, request: AlgorithmRequest) -> RunOutcome {
    let (display_name, warning) = resolve_display_name(&request, block);
    if let Some(warning) = &warning {
        log::warn!("{}", warning);
    }

    let result = match mode {
        ReportMode::Trace => interpret_trace(block, &display_name).map(RunData::Trace),
        ReportMode::Stats => interpret_statistics(block, &display_name).map(RunData::Stats),
    }
    .map(|data| AlgorithmRun {
        request,
        display_name: display_name.clone(),
        data,
    });

    if let Err(err) = &result {
        log::warn!("{}", err);
    }

    RunOutcome {
        request,
        display_name,
        raw_block: block.to_string(),
        result,
        warnings: warning.into_iter().collect(),
    }
}

/// Build the display name, cross-checking the quantum against the section title.
///
/// The request's quantum is authoritative; the title value is only used when
/// the request carries none.
fn resolve_display_name(request: &AlgorithmRequest, block: &str) -> (String, Option<ReportError>) {
    let id = request.id();
    if !id.is_quantum_based() {
        return (request.display_name(), None);
    }

    let reported = block.lines().find(|line| !line.trim().is_empty()).and_then(title_quantum);
    match (request.quantum(), reported) {
        (Some(requested), Some(reported)) if requested != reported => {
            let display_name = request.display_name();
            let warning = ReportError::QuantumInconsistency {
                algorithm: display_name.clone(),
                requested,
                reported,
            };
            (display_name, Some(warning))
        }
        (None, reported) => (display_name_with_quantum(id, reported), None),
        _ => (request.display_name(), None),
    }
}

/// Extract `n` from an `RR-<n>` token in a title line.
fn title_quantum(title: &str) -> Option<u32> {
    let start = title.find(QUANTUM_TITLE_MARKER)? + QUANTUM_TITLE_MARKER.len();
    let digits: String = title[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::AlgorithmId;

    const STATS_FCFS: &str = "FCFS\n\
Process    |  A  |  B  |  C  |\n\
Arrival    |  0  |  2  |  4  |\n\
Service    |  3  |  3  |  3  | Mean|\n\
Finish     |  3  |  6  |  9  |-----|\n\
Turnaround |  3  |  4  |  5  | 4.00|\n\
NormTurn   | 1.00| 1.33| 1.67| 1.33|";

    const STATS_RR: &str = "RR-1\n\
Process    |  A  |  B  |  C  |\n\
Arrival    |  0  |  2  |  4  |\n\
Service    |  3  |  3  |  3  | Mean|\n\
Finish     |  4  |  8  |  9  |-----|\n\
Turnaround |  4  |  6  |  5  | 5.00|\n\
NormTurn   | 1.33| 2.00| 1.67| 1.67|";

    fn request(id: AlgorithmId, quantum: Option<u32>) -> AlgorithmRequest {
        AlgorithmRequest::new(id, quantum).unwrap()
    }

    #[test]
    fn test_title_quantum() {
        assert_eq!(title_quantum("RR-4"), Some(4));
        assert_eq!(title_quantum("RR-12  0 1 2 3"), Some(12));
        assert_eq!(title_quantum("FCFS"), None);
        assert_eq!(title_quantum("RR-"), None);
    }

    #[test]
    fn test_stats_batch_with_comparison() {
        let requests = [request(AlgorithmId::Fcfs, None), request(AlgorithmId::RoundRobin, Some(1))];
        let raw = format!("{}\n\n{}\n", STATS_FCFS, STATS_RR);
        let report = interpret_report(&raw, ReportMode::Stats, &requests);

        assert!(report.batch_error.is_none());
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[1].display_name, "RR (Round Robin) (Quantum: 1)");
        assert!(report.outcomes[1].warnings.is_empty());

        let comparison = report.comparison.as_ref().unwrap();
        assert_eq!(comparison.best_turnaround().algorithm, "FCFS (First Come First Serve)");
        assert_eq!(comparison.best_normalized().algorithm, "FCFS (First Come First Serve)");
    }

    #[test]
    fn test_malformed_run_is_isolated() {
        let requests = [request(AlgorithmId::Fcfs, None), request(AlgorithmId::RoundRobin, Some(1))];
        let broken = STATS_FCFS.replace("|  6  |", "|  ?  |");
        let raw = format!("{}\n\n{}\n", broken, STATS_RR);
        let report = interpret_report(&raw, ReportMode::Stats, &requests);

        assert!(matches!(
            report.outcomes[0].result,
            Err(ReportError::MalformedStatistics { .. })
        ));
        assert!(report.outcomes[1].result.is_ok());
        assert_eq!(report.failed_count(), 1);
        // A single successful run leaves nothing to compare.
        assert!(report.comparison.is_none());
    }

    #[test]
    fn test_block_count_mismatch_reported_once() {
        let requests = [
            request(AlgorithmId::Fcfs, None),
            request(AlgorithmId::RoundRobin, Some(1)),
            request(AlgorithmId::Spn, None),
        ];
        let raw = format!("{}\n\n{}\n", STATS_FCFS, STATS_RR);
        let report = interpret_report(&raw, ReportMode::Stats, &requests);

        assert_eq!(
            report.batch_error,
            Some(ReportError::BlockCountMismatch { requested: 3, found: 2 })
        );
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.outcomes.iter().all(|outcome| outcome.result.is_ok()));
        assert_eq!(report.missing_requests(&requests).len(), 1);
        assert_eq!(report.missing_requests(&requests)[0].id(), AlgorithmId::Spn);
    }

    #[test]
    fn test_quantum_inconsistency_favors_request() {
        let requests = [request(AlgorithmId::RoundRobin, Some(4))];
        let report = interpret_report(STATS_RR, ReportMode::Stats, &requests);

        let outcome = &report.outcomes[0];
        assert!(outcome.result.is_ok());
        assert_eq!(outcome.display_name, "RR (Round Robin) (Quantum: 4)");
        assert_eq!(
            outcome.warnings,
            vec![ReportError::QuantumInconsistency {
                algorithm: "RR (Round Robin) (Quantum: 4)".to_string(),
                requested: 4,
                reported: 1,
            }]
        );
        assert!(!outcome.warnings[0].is_fatal());
    }

    #[test]
    fn test_trace_batch() {
        let requests = [request(AlgorithmId::Fcfs, None), request(AlgorithmId::Spn, None)];
        let raw = "FCFS  0 1 2 3\n--------\nA|*|*| | |\nB| | |*|*|\n--------\n\n\
SPN   0 1 2 3\n--------\nA|*|*| |\n--------\n";
        let report = interpret_report(raw, ReportMode::Trace, &requests);

        assert!(report.batch_error.is_none());
        assert!(report.comparison.is_none());
        assert_eq!(report.successful_runs().count(), 2);
        let trace = report.outcomes[0].result.as_ref().unwrap().as_trace().unwrap();
        assert_eq!(trace.horizon, 4);
        assert_eq!(trace.timelines[1].intervals[0].start, 2);
        assert_eq!(trace.timelines[1].intervals[0].end, 4);
    }
}
