//! Chart and table structures handed to the UI.
//!
//! No interpretation happens here; parsed runs are only reshaped into what the
//! timeline canvas, the statistics tables and the comparison view draw.

use crate::analytics::{ComparisonRow, ComparisonSummary};
use crate::report::AlgorithmRun;

/// Number of distinct lane colors before the palette repeats.
pub const PALETTE_SIZE: usize = 12;

/// A bar of the timeline chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineBar {
    pub start: u32,
    pub end: u32,
    pub duration: u32,
    /// `start-end`, drawn inside the bar.
    pub label: String,
}

/// All bars of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineLane {
    pub process: String,
    /// Index into a palette of `PALETTE_SIZE` colors.
    pub color_index: usize,
    pub bars: Vec<TimelineBar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineChart {
    pub title: String,
    pub horizon: u32,
    pub lanes: Vec<TimelineLane>,
}

impl TimelineChart {
    /// Height in points: a fixed base plus one band per lane.
    pub fn preferred_height(&self) -> f32 {
        300.0 + self.lanes.len() as f32 * 50.0
    }
}

/// A labelled scalar shown next to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCallout {
    pub label: &'static str,
    pub value: String,
}

pub const STATS_COLUMNS: [&str; 6] = [
    "Process",
    "Arrival Time",
    "Service Time",
    "Finish Time",
    "Turnaround Time",
    "Normalized Turnaround",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTable {
    pub title: String,
    pub rows: Vec<[String; 6]>,
    pub metrics: Vec<MetricCallout>,
}

/// Best algorithm for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCallout {
    pub label: &'static str,
    pub algorithm: String,
    pub value: f64,
}

impl BestCallout {
    pub fn text(&self) -> String {
        format!("{} ({:.2})", self.algorithm, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub rows: Vec<ComparisonRow>,
    pub turnaround_series: Vec<(String, f64)>,
    pub normalized_series: Vec<(String, f64)>,
    pub best_turnaround: BestCallout,
    pub best_normalized: BestCallout,
}

/// Timeline chart of a trace run; `None` for stats runs.
pub fn timeline_chart(run: &AlgorithmRun) -> Option<TimelineChart> {
    let trace = run.as_trace()?;

    let mut seen: Vec<&str> = Vec::new();
    let lanes = trace
        .timelines
        .iter()
        .map(|timeline| {
            let color_index = match seen.iter().position(|name| *name == timeline.process_name) {
                Some(index) => index,
                None => {
                    seen.push(&timeline.process_name);
                    seen.len() - 1
                }
            } % PALETTE_SIZE;

            TimelineLane {
                process: timeline.process_name.clone(),
                color_index,
                bars: timeline
                    .intervals
                    .iter()
                    .map(|interval| TimelineBar {
                        start: interval.start,
                        end: interval.end,
                        duration: interval.duration(),
                        label: format!("{}-{}", interval.start, interval.end),
                    })
                    .collect(),
            }
        })
        .collect();

    Some(TimelineChart {
        title: format!("Timeline for {}", run.display_name),
        horizon: trace.horizon,
        lanes,
    })
}

/// Statistics table with metric callouts; `None` for trace runs.
pub fn stats_table(run: &AlgorithmRun) -> Option<StatsTable> {
    let stats = run.as_stats()?;

    let rows = stats
        .rows
        .iter()
        .map(|row| {
            [
                row.process_name.clone(),
                row.arrival_time.to_string(),
                row.service_time.to_string(),
                row.finish_time.to_string(),
                row.turnaround_time.to_string(),
                format!("{:.2}", row.normalized_turnaround),
            ]
        })
        .collect();

    Some(StatsTable {
        title: run.display_name.clone(),
        rows,
        metrics: vec![
            MetricCallout {
                label: "Mean Turnaround Time",
                value: format!("{:.2}", stats.mean_turnaround),
            },
            MetricCallout {
                label: "Mean Normalized Turnaround",
                value: format!("{:.2}", stats.mean_normalized_turnaround),
            },
            MetricCallout {
                label: "Total Completion Time",
                value: stats.total_completion_time().to_string(),
            },
        ],
    })
}

pub fn comparison_view(summary: &ComparisonSummary) -> ComparisonView {
    let best_turnaround = summary.best_turnaround();
    let best_normalized = summary.best_normalized();

    ComparisonView {
        rows: summary.rows.clone(),
        turnaround_series: summary.rows.iter().map(|row| (row.algorithm.clone(), row.mean_turnaround)).collect(),
        normalized_series: summary
            .rows
            .iter()
            .map(|row| (row.algorithm.clone(), row.mean_normalized_turnaround))
            .collect(),
        best_turnaround: BestCallout {
            label: "Best Mean Turnaround Time",
            algorithm: best_turnaround.algorithm.clone(),
            value: best_turnaround.mean_turnaround,
        },
        best_normalized: BestCallout {
            label: "Best Normalized Turnaround",
            algorithm: best_normalized.algorithm.clone(),
            value: best_normalized.mean_normalized_turnaround,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compare_runs;
    use crate::report::interpret_report;
    use crate::workload::{AlgorithmId, AlgorithmRequest, ReportMode};

    #[test]
    fn test_timeline_chart_lanes_and_labels() {
        let requests = [AlgorithmRequest::new(AlgorithmId::Fcfs, None).unwrap()];
        let raw = "FCFS\n------\nA|*|*| | | |\nB| | |*|*| |\nC| | | | | |\n------\n";
        let report = interpret_report(raw, ReportMode::Trace, &requests);
        let run = report.outcomes[0].result.as_ref().unwrap();

        let chart = timeline_chart(run).unwrap();
        assert_eq!(chart.title, "Timeline for FCFS (First Come First Serve)");
        assert_eq!(chart.horizon, 5);
        assert_eq!(chart.lanes.len(), 3);
        assert_eq!(chart.lanes[1].color_index, 1);
        assert_eq!(chart.lanes[1].bars[0].label, "2-4");
        assert_eq!(chart.lanes[1].bars[0].duration, 2);
        assert!(chart.lanes[2].bars.is_empty());
        assert_eq!(chart.preferred_height(), 450.0);
        assert!(stats_table(run).is_none());
    }

    #[test]
    fn test_stats_table_and_comparison_view() {
        let requests = [
            AlgorithmRequest::new(AlgorithmId::Fcfs, None).unwrap(),
            AlgorithmRequest::new(AlgorithmId::Spn, None).unwrap(),
        ];
        let raw = "FCFS\n\
Process    |  A  |  B  |\n\
Arrival    |  0  |  1  |\n\
Service    |  4  |  1  | Mean|\n\
Finish     |  4  |  5  |-----|\n\
Turnaround |  4  |  4  | 4.00|\n\
NormTurn   | 1.00| 4.00| 2.50|\n\
\n\
SPN\n\
Process    |  A  |  B  |\n\
Arrival    |  0  |  1  |\n\
Service    |  4  |  1  | Mean|\n\
Finish     |  4  |  5  |-----|\n\
Turnaround |  4  |  4  | 4.00|\n\
NormTurn   | 1.00| 4.00| 2.50|\n";
        let report = interpret_report(raw, ReportMode::Stats, &requests);
        assert!(report.outcomes.iter().all(|outcome| outcome.result.is_ok()));

        let run = report.outcomes[1].result.as_ref().unwrap();
        let table = stats_table(run).unwrap();
        assert_eq!(table.rows[1], ["B", "1", "1", "5", "4", "4.00"].map(String::from));
        assert_eq!(table.metrics[2].value, "5");

        let summary = compare_runs(report.successful_runs()).unwrap();
        let view = comparison_view(&summary);
        assert_eq!(view.turnaround_series.len(), 2);
        assert_eq!(view.best_turnaround.text(), "FCFS (First Come First Serve) (4.00)");
        assert_eq!(view.best_normalized.algorithm, "FCFS (First Come First Serve)");
    }
}
