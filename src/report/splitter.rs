//! Split a raw multi-algorithm report into one block per algorithm section.

use super::error::ReportError;
use crate::workload::AlgorithmRequest;

/// Report blocks in section order, alongside the number of requested algorithms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlocks {
    pub blocks: Vec<String>,
    pub requested: usize,
}

impl ReportBlocks {
    /// Batch-level error when the section count differs from the request count.
    pub fn mismatch(&self) -> Option<ReportError> {
        (self.blocks.len() != self.requested).then(|| ReportError::BlockCountMismatch {
            requested: self.requested,
            found: self.blocks.len(),
        })
    }

    /// Pair requests with blocks positionally, up to the shorter of the two lists.
    pub fn paired<'a>(&'a self, requests: &'a [AlgorithmRequest]) -> impl Iterator<Item = (&'a AlgorithmRequest, &'a str)> {
        requests.iter().zip(self.blocks.iter().map(String::as_str))
    }
}

/// Split `raw` on blank lines (lines holding only whitespace).
///
/// Runs of blank lines count as a single delimiter; leading and trailing
/// blank lines never produce an empty block. All blocks found are returned,
/// even when their count differs from `requests.len()`.
pub fn split_report(raw: &str, requests: &[AlgorithmRequest]) -> ReportBlocks {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    log::debug!("Split report into {} block(s) for {} requested algorithm(s)", blocks.len(), requests.len());

    ReportBlocks {
        blocks,
        requested: requests.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::AlgorithmId;

    fn requests(count: usize) -> Vec<AlgorithmRequest> {
        [AlgorithmId::Fcfs, AlgorithmId::Spn, AlgorithmId::Hrrn]
            .into_iter()
            .take(count)
            .map(|id| AlgorithmRequest::new(id, None).unwrap())
            .collect()
    }

    #[test]
    fn test_split_on_blank_lines() {
        let raw = "\nFCFS\nrow 1\n\n  \t\nSPN\nrow 2\n\nHRRN\nrow 3\n\n";
        let split = split_report(raw, &requests(3));
        assert_eq!(split.blocks, vec!["FCFS\nrow 1", "SPN\nrow 2", "HRRN\nrow 3"]);
        assert!(split.mismatch().is_none());
    }

    #[test]
    fn test_fewer_blocks_than_requests() {
        let reqs = requests(3);
        let split = split_report("FCFS\nrow 1\n\nSPN\nrow 2\n", &reqs);
        assert_eq!(split.blocks.len(), 2);
        assert_eq!(split.mismatch(), Some(ReportError::BlockCountMismatch { requested: 3, found: 2 }));

        let paired: Vec<_> = split.paired(&reqs).collect();
        assert_eq!(paired.len(), 2);
        assert_eq!(paired[1].0.id(), AlgorithmId::Spn);
        assert_eq!(paired[1].1, "SPN\nrow 2");
    }

    #[test]
    fn test_crlf_and_empty_input() {
        let split = split_report("A\r\nB\r\n\r\nC\r\n", &requests(2));
        assert_eq!(split.blocks, vec!["A\nB", "C"]);

        let empty = split_report("   \n\n", &requests(1));
        assert!(empty.blocks.is_empty());
        assert!(empty.mismatch().is_some());
    }
}
