//! Cross-run comparison of statistics runs.

use crate::report::AlgorithmRun;

/// One algorithm's entry in the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Algorithm display name, the table key.
    pub algorithm: String,
    pub mean_turnaround: f64,
    pub mean_normalized_turnaround: f64,
    /// Finish time of the last process.
    pub total_completion_time: u32,
}

/// Rankings over two or more stats runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSummary {
    /// Rows in run order.
    pub rows: Vec<ComparisonRow>,
    best_turnaround: usize,
    best_normalized: usize,
}

impl ComparisonSummary {
    /// Row with the minimal mean turnaround (first listed on ties).
    pub fn best_turnaround(&self) -> &ComparisonRow {
        &self.rows[self.best_turnaround]
    }

    /// Row with the minimal mean normalized turnaround (first listed on ties).
    pub fn best_normalized(&self) -> &ComparisonRow {
        &self.rows[self.best_normalized]
    }

    /// Look up a row by algorithm display name.
    pub fn row(&self, algorithm: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.algorithm == algorithm)
    }
}

/// Compare the stats runs among `runs`.
///
/// Trace runs are ignored. With fewer than two stats runs there is nothing to
/// compare and `None` is returned.
pub fn compare_runs<'a>(runs: impl IntoIterator<Item = &'a AlgorithmRun>) -> Option<ComparisonSummary> {
    let rows: Vec<ComparisonRow> = runs
        .into_iter()
        .filter_map(|run| {
            run.as_stats().map(|stats| ComparisonRow {
                algorithm: run.display_name.clone(),
                mean_turnaround: stats.mean_turnaround,
                mean_normalized_turnaround: stats.mean_normalized_turnaround,
                total_completion_time: stats.total_completion_time(),
            })
        })
        .collect();

    if rows.len() < 2 {
        log::debug!("Skipping comparison: {} stats run(s)", rows.len());
        return None;
    }

    let best_turnaround = index_of_min(&rows, |row| row.mean_turnaround);
    let best_normalized = index_of_min(&rows, |row| row.mean_normalized_turnaround);

    Some(ComparisonSummary {
        rows,
        best_turnaround,
        best_normalized,
    })
}

/// Index of the first row holding the minimal key.
fn index_of_min(rows: &[ComparisonRow], key: fn(&ComparisonRow) -> f64) -> usize {
    let mut best = 0;
    for (index, row) in rows.iter().enumerate().skip(1) {
        if key(row) < key(&rows[best]) {
            best = index;
        }
    }
    best
}
