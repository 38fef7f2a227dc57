//! Engine input format.
//!
//! The scheduling engine reads its workload from stdin:
//!
//! ```text
//! stats          <- report mode (trace | stats)
//! 1,2-4,3        <- algorithm list, quantum-based policies as <code>-<quantum>
//! 20             <- last instant (timeline length)
//! 2              <- process count
//! A,0,3          <- name,arrival,service (one line per process)
//! B,2,6
//! ```

use super::types::{AlgorithmId, AlgorithmRequest, Workload, WorkloadError};

/// Render a workload into the engine's stdin format (newline terminated).
pub fn render_engine_input(workload: &Workload) -> String {
    let algorithms: Vec<String> = workload.algorithms.iter().map(AlgorithmRequest::engine_token).collect();

    let mut lines = vec![
        workload.mode.keyword().to_string(),
        algorithms.join(","),
        workload.last_instant.to_string(),
        workload.processes.len().to_string(),
    ];

    for process in &workload.processes {
        lines.push(format!("{},{},{}", process.name(), process.arrival_time(), process.service_time()));
    }

    let mut input = lines.join("\n");
    input.push('\n');
    input
}

/// Parse an algorithm list such as `1,2-4,5` into requests.
pub fn parse_algorithm_list(list: &str) -> Result<Vec<AlgorithmRequest>, WorkloadError> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_algorithm_token)
        .collect()
}

fn parse_algorithm_token(token: &str) -> Result<AlgorithmRequest, WorkloadError> {
    let (code_str, quantum_str) = match token.split_once('-') {
        Some((code, quantum)) => (code, Some(quantum)),
        None => (token, None),
    };

    let id = code_str
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(AlgorithmId::from_code)
        .ok_or_else(|| WorkloadError::InvalidAlgorithm(format!("unknown algorithm code '{}'", token)))?;

    let quantum = match quantum_str {
        Some(q) => Some(
            q.trim()
                .parse::<u32>()
                .map_err(|_| WorkloadError::InvalidAlgorithm(format!("invalid quantum in '{}'", token)))?,
        ),
        None => None,
    };

    AlgorithmRequest::new(id, quantum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{Process, ReportMode};

    #[test]
    fn test_render_engine_input() {
        let workload = Workload {
            mode: ReportMode::Trace,
            algorithms: vec![
                AlgorithmRequest::new(AlgorithmId::Fcfs, None).unwrap(),
                AlgorithmRequest::new(AlgorithmId::RoundRobin, Some(4)).unwrap(),
            ],
            last_instant: 20,
            processes: vec![Process::new("A", 0, 3).unwrap(), Process::new("B", 2, 6).unwrap()],
        };

        assert_eq!(render_engine_input(&workload), "trace\n1,2-4\n20\n2\nA,0,3\nB,2,6\n");
    }

    #[test]
    fn test_parse_algorithm_list() {
        let requests = parse_algorithm_list("1, 2-4,8").unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].id(), AlgorithmId::Fcfs);
        assert_eq!(requests[1].id(), AlgorithmId::RoundRobin);
        assert_eq!(requests[1].quantum(), Some(4));
        assert_eq!(requests[2].id(), AlgorithmId::Aging);
    }

    #[test]
    fn test_parse_algorithm_list_rejects_bad_tokens() {
        assert!(parse_algorithm_list("9").is_err());
        assert!(parse_algorithm_list("x").is_err());
        assert!(parse_algorithm_list("2").is_err());
        assert!(parse_algorithm_list("2-q").is_err());
        assert!(parse_algorithm_list("1-3").is_err());
        assert!(parse_algorithm_list("").unwrap().is_empty());
    }
}
