//! Blocking invocation of the scheduling engine.

use anyhow::{Context, bail};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::AppConfig;
use crate::workload::{Workload, render_engine_input};

/// Run the scheduling engine on a workload and return its raw report.
///
/// The workload is validated, rendered into the engine's stdin format and
/// piped to the executable named by `engine-path`. The whole of stdout is
/// returned once the process exits.
///
/// # Parameters
///
/// * `config` - Engine location and working directory
/// * `workload` - The workload to simulate
///
/// # Returns
///
/// The engine's stdout, or an error when the workload is invalid, the engine
/// cannot be started, or it exits with a non-zero status (stderr included).
pub fn run_engine(config: &AppConfig, workload: &Workload) -> anyhow::Result<String> {
    workload.validate().context("Invalid workload")?;
    let input = render_engine_input(workload);
    log::debug!("Engine input:\n{}", input);

    let mut command = Command::new(&config.engine_path);
    command.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = &config.working_dir {
        command.current_dir(dir);
    }

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to start scheduling engine: {}", config.engine_path))?;

    {
        let mut stdin = child.stdin.take().context("Engine stdin is not available")?;
        // The engine may exit before reading all of its input.
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(e).context("Failed to write engine input");
            }
            log::warn!("Engine closed its input early");
        }
    }

    let output = child.wait_with_output().context("Failed to wait for scheduling engine")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("Scheduling engine exited with {}: {}", output.status, stderr.trim());
    }

    let report = String::from_utf8(output.stdout).context("Engine output is not valid UTF-8")?;
    log::info!("Engine finished, {} bytes of report", report.len());
    Ok(report)
}

/// Read a raw engine report saved to a file.
pub fn load_saved_report(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{AlgorithmId, AlgorithmRequest, Process, ReportMode};

    fn workload() -> Workload {
        Workload {
            mode: ReportMode::Stats,
            algorithms: vec![
                AlgorithmRequest::new(AlgorithmId::Fcfs, None).unwrap(),
                AlgorithmRequest::new(AlgorithmId::RoundRobin, Some(4)).unwrap(),
            ],
            last_instant: 20,
            processes: vec![Process::new("A", 0, 3).unwrap(), Process::new("B", 2, 4).unwrap()],
        }
    }

    fn config(engine_path: &str) -> AppConfig {
        AppConfig {
            engine_path: engine_path.to_string(),
            ..AppConfig::default()
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_engine_receives_rendered_input() {
        // `cat` echoes its stdin, so the report equals the engine input.
        let report = run_engine(&config("cat"), &workload()).unwrap();
        assert_eq!(report, "stats\n1,2-4\n20\n2\nA,0,3\nB,2,4\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_an_error() {
        let err = run_engine(&config("false"), &workload()).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn test_missing_engine_is_an_error() {
        let err = run_engine(&config("/nonexistent/scheduling-engine"), &workload()).unwrap_err();
        assert!(err.to_string().contains("Failed to start scheduling engine"));
    }

    #[test]
    fn test_invalid_workload_never_reaches_engine() {
        let mut invalid = workload();
        invalid.processes.clear();
        let err = run_engine(&config("/nonexistent/scheduling-engine"), &invalid).unwrap_err();
        assert!(err.to_string().contains("Invalid workload"));
    }

    #[test]
    fn test_load_saved_report_missing_file() {
        assert!(load_saved_report(Path::new("/nonexistent/report.txt")).is_err());
    }
}
