//! Output formatting for batch results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the per-file `AnalysisResult` documents plus failures

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analyze::FileOutcome;
use crate::error::AnalyzeError;
use crate::metrics::AnalysisResult;

/// A file that was found but deliberately not analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: String,
}

/// Results of one batch run, split by outcome.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<AnalyzeError>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchSummary {
    /// Split outcomes while keeping their relative order.
    pub fn from_outcomes(outcomes: Vec<FileOutcome>, skipped: Vec<SkippedFile>) -> Self {
        let mut summary = BatchSummary {
            skipped,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(result) => summary.results.push(result),
                Err(e) => summary.failures.push(e),
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_analyzed: usize,
    pub files_failed: usize,
    pub results: Vec<AnalysisResult>,
    pub failures: Vec<JsonFailure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFailure {
    pub file_name: String,
    pub kind: String,
    pub message: String,
}

impl From<&AnalyzeError> for JsonFailure {
    fn from(e: &AnalyzeError) -> Self {
        JsonFailure {
            file_name: e.file_name().to_string(),
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

pub fn build_json_report(path: &str, summary: &BatchSummary) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_analyzed: summary.results.len(),
        files_failed: summary.failures.len(),
        results: summary.results.clone(),
        failures: summary.failures.iter().map(JsonFailure::from).collect(),
        skipped: summary.skipped.clone(),
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, summary: &BatchSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_json_report(path, summary))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

pub fn write_pretty(path: &str, summary: &BatchSummary) {
    // Header
    println!();
    print!("  ");
    print!("{}", "smartmetrics".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    println!();

    for result in &summary.results {
        write_result(result);
        println!();
    }

    if !summary.failures.is_empty() {
        write_failures(&summary.failures);
        println!();
    }

    if !summary.skipped.is_empty() {
        println!("  {}", "Skipped".dimmed());
        for s in &summary.skipped {
            println!("    {}  {}", s.file_name, s.reason.dimmed());
        }
        println!();
    }

    write_final_status(summary);
    println!();
}

fn write_result(result: &AnalysisResult) {
    let m = result.metrics();
    let flow = result.program_flow();

    print!("  {}", result.file_name().bold());
    print!("  Quality: ");
    write_colored_quality(m.code_quality_score);
    println!("  Complexity: {} (overall {})", m.cyclomatic_complexity, m.overall_complexity);

    println!(
        "    {} {}  {} {}  {} {}  {} {}",
        "lines".dimmed(),
        m.total_lines,
        "classes".dimmed(),
        m.total_classes,
        "methods".dimmed(),
        m.total_methods,
        "variables".dimmed(),
        m.total_variables
    );
    println!(
        "    {} {}  {} {}  {} {}",
        "conditionals".dimmed(),
        m.total_conditionals,
        "loops".dimmed(),
        m.total_loops,
        "exception handling".dimmed(),
        m.exception_handling_count
    );

    if flow.ordered_calls.is_empty() {
        println!("    {} {}", "flow".dimmed(), "(no calls)".dimmed());
    } else {
        println!(
            "    {} {}  {} {}",
            "flow".dimmed(),
            flow.ordered_calls.join(" → "),
            "depth".dimmed(),
            flow.max_depth_estimate
        );
    }
}

fn write_colored_quality(score: f64) {
    let text = format!("{:.2}", score);
    match score {
        s if s >= 90.0 => print!("{}", text.green().bold()),
        s if s >= 75.0 => print!("{}", text.green()),
        s if s >= 50.0 => print!("{}", text.yellow()),
        _ => print!("{}", text.red()),
    }
}

fn write_failures(failures: &[AnalyzeError]) {
    println!("  {}", "Failures".red().bold());
    for e in failures {
        println!(
            "    {} {}  {}",
            "✗".red(),
            e.file_name(),
            format!("[{}] {}", e.kind(), e).dimmed()
        );
    }
}

fn write_final_status(summary: &BatchSummary) {
    let analyzed = summary.results.len();
    let failed = summary.failures.len();
    if failed == 0 {
        print!("  {}", "✓".green());
    } else {
        print!("  {}", "✗".red());
    }
    print!(" {} analyzed", analyzed);
    if failed > 0 {
        print!(", {}", format!("{} failed", failed).red());
    }
    if !summary.skipped.is_empty() {
        print!(", {} skipped", summary.skipped.len());
    }
    println!();
}
