//! Error type for report interpretation.

/// Failures raised while interpreting an engine report.
///
/// Every variant carries enough context (algorithm display name, offending raw
/// text) to render a diagnostic to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// A trace block has no usable separator-bounded timeline region.
    MalformedTrace { algorithm: String, reason: String, raw: String },
    /// A stats block is missing a row, has an arity mismatch or an unparseable cell.
    MalformedStatistics { algorithm: String, reason: String, raw: String },
    /// The report holds a different number of sections than algorithms were requested.
    BlockCountMismatch { requested: usize, found: usize },
    /// The quantum in the report title disagrees with the request. Non-fatal.
    QuantumInconsistency { algorithm: String, requested: u32, reported: u32 },
}

impl ReportError {
    /// Whether the error invalidates the run it belongs to.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ReportError::QuantumInconsistency { .. })
    }

    /// Offending raw text, if the error carries any.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            ReportError::MalformedTrace { raw, .. } | ReportError::MalformedStatistics { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::MalformedTrace { algorithm, reason, .. } => {
                write!(f, "Malformed trace for {}: {}", algorithm, reason)
            }
            ReportError::MalformedStatistics { algorithm, reason, .. } => {
                write!(f, "Malformed statistics for {}: {}", algorithm, reason)
            }
            ReportError::BlockCountMismatch { requested, found } => write!(
                f,
                "Report contains {} algorithm section(s) but {} algorithm(s) were requested",
                found, requested
            ),
            ReportError::QuantumInconsistency {
                algorithm,
                requested,
                reported,
            } => write!(
                f,
                "Quantum mismatch for {}: requested {}, report title says {} (using {})",
                algorithm, requested, reported, requested
            ),
        }
    }
}

impl std::error::Error for ReportError {}
