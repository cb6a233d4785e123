//! Integration tests for per-file extraction.
//!
//! These tests run the public pipeline over the fixtures in `testdata/`
//! and check every metric by hand-counted values.

use std::path::PathBuf;

use smartmetrics::{analyze_batch, analyze_source, AnalysisResult, AnalyzeError, SourceFile};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn read_fixture(name: &str) -> Vec<u8> {
    std::fs::read(testdata_path().join(name)).expect("fixture should exist")
}

fn analyze_fixture(name: &str) -> AnalysisResult {
    analyze_source(name, &read_fixture(name)).expect("fixture should analyze")
}

// =============================================================================
// Java
// =============================================================================

#[test]
fn test_java_fixture_metrics() {
    let result = analyze_fixture("Inventory.java");
    let m = result.metrics();

    assert_eq!(m.total_lines, 29);
    assert_eq!(m.total_classes, 1);
    // The constructor is not a method
    assert_eq!(m.total_methods, 2);
    // count, sum and the for-each variable
    assert_eq!(m.total_variables, 3);
    assert_eq!(m.total_conditionals, 1);
    assert_eq!(m.total_loops, 1);
    assert_eq!(m.exception_handling_count, 3);
    assert_eq!(m.cyclomatic_complexity, 4);
    assert_eq!(m.code_quality_score, 90.0);
    assert_eq!(m.overall_complexity, 9);
}

#[test]
fn test_java_fixture_flow() {
    let result = analyze_fixture("Inventory.java");
    let flow = result.program_flow();

    assert_eq!(flow.ordered_calls, vec!["println", "total", "of"]);
    assert_eq!(flow.max_depth_estimate, 2);
}

#[test]
fn test_java_syntax_error_fails() {
    let err = analyze_source("Broken.java", &read_fixture("Broken.java")).unwrap_err();
    assert_eq!(err.kind(), "parse_failure");
    assert_eq!(err.file_name(), "Broken.java");
}

// =============================================================================
// PHP
// =============================================================================

#[test]
fn test_php_fixture_metrics() {
    let result = analyze_fixture("cart.php");
    let m = result.metrics();

    assert_eq!(m.total_lines, 10);
    assert_eq!(m.total_classes, 1);
    assert_eq!(m.total_methods, 1);
    assert_eq!(m.total_variables, 5);
    assert_eq!(m.total_conditionals, 1);
    assert_eq!(m.total_loops, 1);
    assert_eq!(m.exception_handling_count, 0);
    assert_eq!(m.cyclomatic_complexity, 3);
    assert_eq!(m.code_quality_score, 92.5);
    assert_eq!(m.overall_complexity, 5);

    let flow = result.program_flow();
    assert_eq!(flow.ordered_calls, vec!["add", "log_line"]);
    assert_eq!(flow.max_depth_estimate, 2);
}

// =============================================================================
// Python
// =============================================================================

#[test]
fn test_python_fixture_metrics() {
    let result = analyze_fixture("accumulate.py");
    let m = result.metrics();

    assert_eq!(m.total_lines, 13);
    assert_eq!(m.total_classes, 0);
    assert_eq!(m.total_methods, 1);
    // Only an assignment at the very top of the file is seen
    assert_eq!(m.total_variables, 1);
    // One `if` plus one `and`
    assert_eq!(m.total_conditionals, 2);
    assert_eq!(m.total_loops, 1);
    assert_eq!(m.exception_handling_count, 2);
    assert_eq!(m.cyclomatic_complexity, 5);
    assert_eq!(m.code_quality_score, 87.5);
    assert_eq!(m.overall_complexity, 10);

    let flow = result.program_flow();
    assert_eq!(flow.ordered_calls, vec!["accumulate", "print"]);
    assert_eq!(flow.max_depth_estimate, 2);
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_crlf_input_matches_lf_input() {
    let lf = read_fixture("accumulate.py");
    let crlf = String::from_utf8(lf.clone()).unwrap().replace('\n', "\r\n");

    let a = analyze_source("a.py", &lf).unwrap();
    let b = analyze_source("a.py", crlf.as_bytes()).unwrap();
    assert_eq!(a.metrics(), b.metrics());
    assert_eq!(a.program_flow(), b.program_flow());
}

#[test]
fn test_extension_is_case_insensitive() {
    let result = analyze_source("CART.PHP", &read_fixture("cart.php")).unwrap();
    assert_eq!(result.metrics().total_classes, 1);
}

#[test]
fn test_failures_are_typed() {
    let err = analyze_source("notes.txt", b"hello").unwrap_err();
    assert!(matches!(err, AnalyzeError::UnsupportedLanguage { .. }));

    let err = analyze_source("bad.py", &[0x66, 0xff, 0xfe]).unwrap_err();
    assert!(matches!(err, AnalyzeError::DecodingFailure { .. }));
}

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let files = vec![
        SourceFile::new("Broken.java", read_fixture("Broken.java")),
        SourceFile::new("Inventory.java", read_fixture("Inventory.java")),
        SourceFile::new("cart.php", read_fixture("cart.php")),
        SourceFile::new("readme.md", b"# hi".to_vec()),
        SourceFile::new("accumulate.py", read_fixture("accumulate.py")),
    ];

    let outcomes = analyze_batch(&files);
    assert_eq!(outcomes.len(), 5);
    assert!(outcomes[0].is_err());
    assert_eq!(outcomes[1].as_ref().unwrap().file_name(), "Inventory.java");
    assert_eq!(outcomes[2].as_ref().unwrap().file_name(), "cart.php");
    assert_eq!(outcomes[3].as_ref().unwrap_err().kind(), "unsupported_language");
    assert_eq!(outcomes[4].as_ref().unwrap().file_name(), "accumulate.py");

    // Same result as analyzing alone
    let alone = analyze_fixture("Inventory.java");
    assert_eq!(outcomes[1].as_ref().unwrap(), &alone);
}
