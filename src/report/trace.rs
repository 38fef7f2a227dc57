//! Interpret a trace-format block into per-process execution intervals.
//!
//! Expected block layout:
//!
//! ```text
//! FCFS  0 1 2 3 4 5 6 7 8 9 0
//! ------------------------------
//! A     |*|*|*| | | | | | | | |
//! B     | | | |*|*|*|*| | | | |
//! ------------------------------
//! ```
//!
//! A time-axis ruler may also sit on its own line inside the region; it is skipped.

use super::error::ReportError;
use super::types::{ExecutionInterval, ProcessTimeline, TraceRun};

/// Marker for "process executing during this time unit".
pub const BUSY_MARKER: char = '*';

/// Delimiter between the process name cell and the per-time-unit cells.
pub const CELL_DELIMITER: char = '|';

/// Parse a trace block.
///
/// # Parameters
///
/// * `block` - Raw text of one algorithm section
/// * `algorithm` - Display name used for diagnostics
///
/// # Returns
///
/// The parsed run, or `ReportError::MalformedTrace` without any partial result.
pub fn interpret_trace(block: &str, algorithm: &str) -> Result<TraceRun, ReportError> {
    let region = timeline_region(block).ok_or_else(|| malformed(algorithm, "no dash-separated timeline region", block))?;

    let mut timelines = Vec::new();
    for line in region {
        if line.trim().is_empty() || is_ruler(line) {
            continue;
        }
        let timeline = parse_process_row(line).map_err(|reason| malformed(algorithm, reason, line))?;
        timelines.push(timeline);
    }

    if timelines.is_empty() {
        return Err(malformed(algorithm, "timeline region contains no process rows", block));
    }

    for timeline in timelines.iter().filter(|timeline| timeline.intervals.is_empty()) {
        log::warn!("{}: process {} never held the processor", algorithm, timeline.process_name);
    }

    let horizon = timelines.iter().map(|timeline| timeline.length).max().unwrap_or(0);
    log::debug!("{}: parsed {} process row(s), horizon {}", algorithm, timelines.len(), horizon);

    Ok(TraceRun { horizon, timelines })
}

/// Lines strictly between the first and second separator line.
fn timeline_region(block: &str) -> Option<Vec<&str>> {
    let lines: Vec<&str> = block.lines().collect();
    let first = lines.iter().position(|line| is_separator(line))?;
    let second = lines[first + 1..].iter().position(|line| is_separator(line))? + first + 1;
    Some(lines[first + 1..second].to_vec())
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}

/// A ruler holds only time-axis digits, e.g. `0 1 2 3 4 5`.
fn is_ruler(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(|c: char| c.is_ascii_digit()) && trimmed.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
}

fn parse_process_row(line: &str) -> Result<ProcessTimeline, &'static str> {
    let cells: Vec<&str> = line.split(CELL_DELIMITER).collect();
    if cells.len() < 2 {
        return Err("process row has no '|' delimiter");
    }

    let process_name = cells[0].trim();
    if process_name.is_empty() {
        return Err("process row has no process name");
    }

    // Everything after the last delimiter is a trailing field, not a time unit.
    let markers: Vec<char> = cells[1..cells.len() - 1].iter().flat_map(|cell| cell.chars()).collect();

    Ok(ProcessTimeline {
        process_name: process_name.to_string(),
        length: markers.len() as u32,
        intervals: busy_intervals(process_name, &markers),
    })
}

/// Run-length encode the busy markers into half-open intervals.
///
/// A run still open at the end of the sequence closes at `markers.len()`.
pub fn busy_intervals(process_name: &str, markers: &[char]) -> Vec<ExecutionInterval> {
    let mut intervals = Vec::new();
    let mut run_start: Option<usize> = None;

    for (index, &marker) in markers.iter().enumerate() {
        match (marker == BUSY_MARKER, run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                intervals.push(interval(process_name, start, index));
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        intervals.push(interval(process_name, start, markers.len()));
    }

    intervals
}

fn interval(process_name: &str, start: usize, end: usize) -> ExecutionInterval {
    ExecutionInterval {
        process_name: process_name.to_string(),
        start: start as u32,
        end: end as u32,
    }
}

fn malformed(algorithm: &str, reason: &str, raw: &str) -> ReportError {
    ReportError::MalformedTrace {
        algorithm: algorithm.to_string(),
        reason: reason.to_string(),
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FCFS_TRACE: &str = "FCFS  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 \n\
------------------------------------------------\n\
A     |*|*|*| | | | | | | | | | | | | | | | | | \n\
B     | | | |*|*|*|*|*|*| | | | | | | | | | | | \n\
C     | | | | | | | | | |*|*|*|*| | | | | | | | \n\
D     | | | | | | | | | | | | | |*|*|*|*|*| | | \n\
E     | | | | | | | | | | | | | | | | | | |*|*| \n\
------------------------------------------------";

    fn markers(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn spans(intervals: &[ExecutionInterval]) -> Vec<(u32, u32)> {
        intervals.iter().map(|i| (i.start, i.end)).collect()
    }

    #[test]
    fn test_interpret_engine_trace() {
        let run = interpret_trace(FCFS_TRACE, "FCFS").unwrap();
        assert_eq!(run.timelines.len(), 5);
        assert_eq!(run.horizon, 20);

        let names: Vec<&str> = run.timelines.iter().map(|t| t.process_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);

        assert_eq!(spans(&run.timelines[0].intervals), vec![(0, 3)]);
        assert_eq!(spans(&run.timelines[1].intervals), vec![(3, 9)]);
        assert_eq!(spans(&run.timelines[4].intervals), vec![(18, 20)]);
        assert_eq!(run.intervals().count(), 5);
        assert!(run.idle_processes().is_empty());
    }

    #[test]
    fn test_busy_run_closed_at_horizon() {
        assert_eq!(spans(&busy_intervals("A", &markers("..****...."))), vec![(2, 6)]);
        assert_eq!(spans(&busy_intervals("A", &markers("......****"))), vec![(6, 10)]);
        assert_eq!(spans(&busy_intervals("A", &markers("*.**.*"))), vec![(0, 1), (2, 4), (5, 6)]);
        assert!(busy_intervals("A", &markers("....")).is_empty());
    }

    #[test]
    fn test_marker_round_trip() {
        let rows = ["*..**.*...", "..........", "**********", ".*.*.*.*.*", "...****..."];
        let mut block = String::from("RR-2  0 1 2 3 4 5 6 7 8 9\n----------\n");
        for (i, row) in rows.iter().enumerate() {
            block.push_str(&format!("{}|{}|\n", (b'A' + i as u8) as char, row));
        }
        block.push_str("----------\n");

        let run = interpret_trace(&block, "RR").unwrap();
        for (timeline, row) in run.timelines.iter().zip(rows) {
            assert_eq!(timeline.length, 10);
            assert_eq!(timeline.to_markers('*', '.'), row);
        }
        assert_eq!(run.idle_processes(), vec!["B"]);
    }

    #[test]
    fn test_ruler_line_inside_region_is_skipped() {
        let block = "SPN\n------\n  0 1 2 3\nA|*|*| | |\nB| | |*|*|\n------";
        let run = interpret_trace(block, "SPN").unwrap();
        assert_eq!(run.timelines.len(), 2);
        assert_eq!(spans(&run.timelines[1].intervals), vec![(2, 4)]);
    }

    #[test]
    fn test_missing_region_is_malformed() {
        let err = interpret_trace("FCFS\nA|*|*|\n", "FCFS").unwrap_err();
        assert!(matches!(err, ReportError::MalformedTrace { .. }));

        // Opening separator without a closing one.
        let err = interpret_trace("FCFS\n-----\nA|*|*|\n", "FCFS").unwrap_err();
        assert!(matches!(err, ReportError::MalformedTrace { .. }));

        let err = interpret_trace("FCFS\n-----\n\n-----\n", "FCFS").unwrap_err();
        assert!(matches!(err, ReportError::MalformedTrace { .. }));
    }

    #[test]
    fn test_row_without_delimiter_is_malformed() {
        let err = interpret_trace("FCFS\n-----\nA **..\n-----", "FCFS").unwrap_err();
        match err {
            ReportError::MalformedTrace { algorithm, raw, .. } => {
                assert_eq!(algorithm, "FCFS");
                assert_eq!(raw, "A **..");
            }
            other => panic!("Expected MalformedTrace, got {:?}", other),
        }

        // Valid rows do not rescue a run holding a row without a delimiter.
        let err = interpret_trace("FCFS\n-----\nA|*|*| |\nB **..\n-----", "FCFS").unwrap_err();
        assert_eq!(err.raw_text(), Some("B **.."));
    }
}
