//! Metric values produced for every analyzed file.
//!
//! Extractors build a [`Metrics`] and a [`ProgramFlow`]; [`aggregate`] then
//! derives `overallComplexity` the same way for every dialect.

use serde::{Deserialize, Serialize};

/// Maximum number of distinct call targets kept in a program flow.
pub const MAX_FLOW_CALLS: usize = 10;

/// Quality points lost per unit of cyclomatic complexity.
pub const QUALITY_PENALTY_PER_BRANCH: f64 = 2.5;

/// Structural counts and derived scores for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_lines: u32,
    pub total_classes: u32,
    pub total_methods: u32,
    pub total_variables: u32,
    pub total_conditionals: u32,
    pub total_loops: u32,
    pub exception_handling_count: u32,
    pub cyclomatic_complexity: u32,
    pub code_quality_score: f64,
    /// Zero until [`aggregate`] runs.
    pub overall_complexity: u32,
}

/// Raw counts gathered by an extractor before scores are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub lines: u32,
    pub classes: u32,
    pub methods: u32,
    pub variables: u32,
    pub conditionals: u32,
    pub loops: u32,
    pub exception_handling: u32,
}

impl Metrics {
    /// Build metrics from counts and the dialect's cyclomatic complexity.
    ///
    /// The quality score is derived here; `overall_complexity` is left for
    /// [`aggregate`].
    pub fn from_counts(counts: Counts, cyclomatic_complexity: u32) -> Self {
        let cyclomatic_complexity = cyclomatic_complexity.max(1);
        Self {
            total_lines: counts.lines.max(1),
            total_classes: counts.classes,
            total_methods: counts.methods,
            total_variables: counts.variables,
            total_conditionals: counts.conditionals,
            total_loops: counts.loops,
            exception_handling_count: counts.exception_handling,
            cyclomatic_complexity,
            code_quality_score: quality_score(cyclomatic_complexity),
            overall_complexity: 0,
        }
    }
}

/// `round2(max(0, 100 - cc * 2.5))`
pub fn quality_score(cyclomatic_complexity: u32) -> f64 {
    let raw = (100.0 - f64::from(cyclomatic_complexity) * QUALITY_PENALTY_PER_BRANCH).max(0.0);
    round2(raw)
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Set `overall_complexity` on a completed [`Metrics`].
///
/// The sum re-adds conditionals, loops and exception handling even though the
/// cyclomatic complexity already includes most of them. Existing reports
/// depend on this exact value.
pub fn aggregate(mut metrics: Metrics) -> Metrics {
    metrics.overall_complexity = metrics.cyclomatic_complexity
        + metrics.total_conditionals
        + metrics.total_loops
        + metrics.exception_handling_count;
    metrics
}

/// Approximate call flow of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFlow {
    /// Distinct callee names in first-occurrence order.
    #[serde(rename = "calls")]
    pub ordered_calls: Vec<String>,
    /// 2 when the file has a function that makes a call, otherwise 1.
    #[serde(rename = "depth")]
    pub max_depth_estimate: u32,
}

impl ProgramFlow {
    /// Deduplicate `calls` keeping first occurrences, capped at [`MAX_FLOW_CALLS`].
    pub fn from_calls<I, S>(calls: I, max_depth_estimate: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered_calls: Vec<String> = Vec::with_capacity(MAX_FLOW_CALLS);
        for call in calls {
            if ordered_calls.len() == MAX_FLOW_CALLS {
                break;
            }
            let call = call.into();
            if !ordered_calls.contains(&call) {
                ordered_calls.push(call);
            }
        }
        Self {
            ordered_calls,
            max_depth_estimate: max_depth_estimate.max(1),
        }
    }
}

/// Final per-file report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    file_name: String,
    metrics: Metrics,
    program_flow: ProgramFlow,
}

impl AnalysisResult {
    pub fn new(file_name: impl Into<String>, metrics: Metrics, program_flow: ProgramFlow) -> Self {
        Self {
            file_name: file_name.into(),
            metrics,
            program_flow,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn program_flow(&self) -> &ProgramFlow {
        &self.program_flow
    }
}
