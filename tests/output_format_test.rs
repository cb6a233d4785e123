//! Tests for the JSON output format.
//!
//! Field names are camelCase and must stay stable for downstream tools.

use std::path::PathBuf;

use smartmetrics::analyze_batch;
use smartmetrics::report::{build_json_report, BatchSummary, JsonReport, SkippedFile};
use smartmetrics::SourceFile;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Analyze every fixture and return the JSON report.
fn run_and_get_json() -> JsonReport {
    let testdata = testdata_path();
    let mut names: Vec<String> = std::fs::read_dir(&testdata)
        .expect("should read testdata dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    let files: Vec<SourceFile> = names
        .iter()
        .map(|name| SourceFile::new(name.clone(), std::fs::read(testdata.join(name)).unwrap()))
        .collect();

    let summary = BatchSummary::from_outcomes(analyze_batch(&files), Vec::new());
    build_json_report("testdata", &summary)
}

#[test]
fn test_json_report_counts() {
    let report = run_and_get_json();

    assert_eq!(report.path, "testdata");
    assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(report.files_analyzed, 3);
    assert_eq!(report.files_failed, 1);
    assert!(report.skipped.is_empty());

    // Sorted input order: Broken.java, Inventory.java, accumulate.py, cart.php
    let names: Vec<&str> = report.results.iter().map(|r| r.file_name()).collect();
    assert_eq!(names, vec!["Inventory.java", "accumulate.py", "cart.php"]);

    assert_eq!(report.failures[0].file_name, "Broken.java");
    assert_eq!(report.failures[0].kind, "parse_failure");
}

#[test]
fn test_json_field_names() {
    let report = run_and_get_json();
    let json = serde_json::to_value(&report).expect("should serialize");

    for key in ["version", "path", "filesAnalyzed", "filesFailed", "results", "failures"] {
        assert!(json.get(key).is_some(), "missing top-level key {}", key);
    }
    assert!(json.get("skipped").is_none(), "empty skipped list should be omitted");

    let first = &json["results"][0];
    assert_eq!(first["fileName"], "Inventory.java");

    let metrics = &first["metrics"];
    for key in [
        "totalLines",
        "totalClasses",
        "totalMethods",
        "totalVariables",
        "totalConditionals",
        "totalLoops",
        "exceptionHandlingCount",
        "cyclomaticComplexity",
        "codeQualityScore",
        "overallComplexity",
    ] {
        assert!(metrics.get(key).is_some(), "missing metrics key {}", key);
    }
    assert_eq!(metrics["codeQualityScore"], 90.0);

    let flow = &first["programFlow"];
    assert_eq!(flow["calls"][0], "println");
    assert_eq!(flow["depth"], 2);
}

#[test]
fn test_json_roundtrip_preserves_report() {
    let report = run_and_get_json();
    let text = serde_json::to_string_pretty(&report).expect("should serialize");
    let parsed: JsonReport = serde_json::from_str(&text).expect("should parse");

    assert_eq!(parsed.files_analyzed, report.files_analyzed);
    assert_eq!(parsed.results, report.results);
    assert_eq!(parsed.failures[0].message, report.failures[0].message);
}

#[test]
fn test_json_skipped_entries() {
    let skipped = vec![SkippedFile {
        file_name: "big.py".to_string(),
        reason: "larger than 64 bytes".to_string(),
    }];
    let summary = BatchSummary::from_outcomes(Vec::new(), skipped);
    let json = serde_json::to_value(build_json_report(".", &summary)).unwrap();

    assert_eq!(json["skipped"][0]["fileName"], "big.py");
    assert_eq!(json["skipped"][0]["reason"], "larger than 64 bytes");
    assert_eq!(json["filesAnalyzed"], 0);
}
