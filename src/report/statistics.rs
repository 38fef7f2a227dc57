//! Interpret a stats-format block into a per-process metrics table.
//!
//! Expected block layout (title row, then six `|`-delimited rows):
//!
//! ```text
//! FCFS
//! Process    |  A  |  B  |  C  |
//! Arrival    |  0  |  2  |  4  |
//! Service    |  3  |  3  |  3  | Mean|
//! Finish     |  3  |  7  | 11  |-----|
//! Turnaround |  3  |  5  |  7  | 5.00|
//! NormTurn   | 1.00| 1.67| 2.33| 1.67|
//! ```
//!
//! The first cell of every row (label or empty leading field) is dropped, as is
//! a blank trailing cell left by a closing delimiter.

use super::error::ReportError;
use super::trace::CELL_DELIMITER;
use super::types::{ProcessStatRow, StatsRun};

/// Number of table rows following the title row.
const STATS_ROW_COUNT: usize = 6;

/// Allowed deviation between reported and recomputed normalized turnaround (values are printed with 2 decimals).
const NORMALIZED_TOLERANCE: f64 = 0.01;

/// Parse a stats block.
///
/// # Parameters
///
/// * `block` - Raw text of one algorithm section
/// * `algorithm` - Display name used for diagnostics
///
/// # Returns
///
/// The parsed run, or `ReportError::MalformedStatistics` without any partial table.
pub fn interpret_statistics(block: &str, algorithm: &str) -> Result<StatsRun, ReportError> {
    let mut lines = block.lines().filter(|line| !line.trim().is_empty());
    let title = lines.next().ok_or_else(|| malformed(algorithm, "empty block".to_string(), block))?;
    let rows: Vec<&str> = lines.by_ref().take(STATS_ROW_COUNT).collect();

    if rows.len() < STATS_ROW_COUNT {
        return Err(malformed(
            algorithm,
            format!("expected {} rows after the title, found {}", STATS_ROW_COUNT, rows.len()),
            block,
        ));
    }
    let ignored = lines.count();
    if ignored > 0 {
        log::debug!("{}: ignoring {} line(s) after the statistics table", algorithm, ignored);
    }
    log::debug!("{}: parsing statistics table titled '{}'", algorithm, title.trim());

    let names = row_cells(rows[0]);
    if names.is_empty() || names.iter().any(|name| name.is_empty()) {
        return Err(malformed(algorithm, "process row has no usable names".to_string(), rows[0]));
    }
    let process_count = names.len();

    let arrivals = parse_integers(algorithm, rows[1], row_cells(rows[1]), process_count)?;
    let services = parse_integers(algorithm, rows[2], without_marker_column(row_cells(rows[2]), process_count), process_count)?;
    let finishes = parse_integers(algorithm, rows[3], without_marker_column(row_cells(rows[3]), process_count), process_count)?;
    let (turnarounds, mean_turnaround) = parse_values_with_mean(algorithm, rows[4], process_count, parse_integer)?;
    let (normalized, mean_normalized_turnaround) = parse_values_with_mean(algorithm, rows[5], process_count, parse_float)?;

    let mut table = Vec::with_capacity(process_count);
    for i in 0..process_count {
        let row = ProcessStatRow {
            process_name: names[i].to_string(),
            arrival_time: arrivals[i],
            service_time: services[i],
            finish_time: finishes[i],
            turnaround_time: turnarounds[i],
            normalized_turnaround: normalized[i],
        };
        check_row(algorithm, &row, &rows)?;
        table.push(row);
    }

    Ok(StatsRun {
        rows: table,
        mean_turnaround,
        mean_normalized_turnaround,
    })
}

/// Split a row on the delimiter, dropping the label cell and a blank trailing cell.
fn row_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.split(CELL_DELIMITER).skip(1).map(str::trim).collect();
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

/// Drop a trailing non-numeric marker column such as `Mean` or `-----`.
fn without_marker_column(mut cells: Vec<&str>, process_count: usize) -> Vec<&str> {
    if cells.len() == process_count + 1 && cells.last().is_some_and(|cell| cell.parse::<f64>().is_err()) {
        cells.pop();
    }
    cells
}

fn parse_integer(cell: &str) -> Option<u32> {
    cell.parse().ok()
}

fn parse_float(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_integers(algorithm: &str, line: &str, cells: Vec<&str>, process_count: usize) -> Result<Vec<u32>, ReportError> {
    if cells.len() != process_count {
        return Err(malformed(
            algorithm,
            format!("expected {} values, found {}", process_count, cells.len()),
            line,
        ));
    }
    cells
        .into_iter()
        .map(|cell| parse_integer(cell).ok_or_else(|| malformed(algorithm, format!("'{}' is not an integer", cell), line)))
        .collect()
}

/// Parse `process_count` per-process values followed by one floating point mean.
fn parse_values_with_mean<T>(
    algorithm: &str,
    line: &str,
    process_count: usize,
    parse: fn(&str) -> Option<T>,
) -> Result<(Vec<T>, f64), ReportError> {
    let cells = row_cells(line);
    if cells.len() != process_count + 1 {
        return Err(malformed(
            algorithm,
            format!("expected {} values plus a mean, found {} cells", process_count, cells.len()),
            line,
        ));
    }

    let mut values = Vec::with_capacity(process_count);
    for cell in &cells[..process_count] {
        let value = parse(cell).ok_or_else(|| malformed(algorithm, format!("'{}' is not a valid value", cell), line))?;
        values.push(value);
    }

    let mean_cell = cells[process_count];
    let mean = parse_float(mean_cell).ok_or_else(|| malformed(algorithm, format!("'{}' is not a valid mean", mean_cell), line))?;

    Ok((values, mean))
}

/// Enforce the turnaround invariants and cross-check derived values.
///
/// Parsed values are authoritative; disagreement with recomputed values is only logged.
fn check_row(algorithm: &str, row: &ProcessStatRow, rows: &[&str]) -> Result<(), ReportError> {
    if row.service_time == 0 {
        return Err(malformed(
            algorithm,
            format!("process {} has a zero service time", row.process_name),
            rows[2],
        ));
    }
    if row.turnaround_time < row.service_time {
        return Err(malformed(
            algorithm,
            format!(
                "process {} turnaround {} is shorter than its service time {}",
                row.process_name, row.turnaround_time, row.service_time
            ),
            rows[4],
        ));
    }
    if row.normalized_turnaround < 1.0 - NORMALIZED_TOLERANCE {
        return Err(malformed(
            algorithm,
            format!("process {} normalized turnaround {:.2} is below 1.0", row.process_name, row.normalized_turnaround),
            rows[5],
        ));
    }

    if row.finish_time.checked_sub(row.arrival_time) != Some(row.turnaround_time) {
        log::warn!(
            "{}: process {} finish {} - arrival {} does not match turnaround {}",
            algorithm,
            row.process_name,
            row.finish_time,
            row.arrival_time,
            row.turnaround_time
        );
    }
    let recomputed = row.turnaround_time as f64 / row.service_time as f64;
    if (recomputed - row.normalized_turnaround).abs() > NORMALIZED_TOLERANCE {
        log::warn!(
            "{}: process {} normalized turnaround {:.2} differs from recomputed {:.2}",
            algorithm,
            row.process_name,
            row.normalized_turnaround,
            recomputed
        );
    }

    Ok(())
}

fn malformed(algorithm: &str, reason: String, raw: &str) -> ReportError {
    ReportError::MalformedStatistics {
        algorithm: algorithm.to_string(),
        reason,
        raw: raw.to_string(),
    }
}
