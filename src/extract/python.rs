//! Python metrics from line-anchored regular expressions.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use super::patterns::{count_matches, total_lines, CallScan, IDENT};
use super::{Extraction, MetricExtractor};
use crate::error::AnalyzeError;
use crate::language::Dialect;
use crate::metrics::{Counts, Metrics, ProgramFlow};

/// Identifiers never reported as Python call targets.
///
/// Intentionally empty: `if(x)` or `while(y)` show up as calls, unlike PHP.
pub const PYTHON_CALL_KEYWORDS: &[&str] = &[];

lazy_static! {
    static ref CLASS: Regex = Regex::new(&format!(r"(?m)^\s*class\s+{IDENT}")).unwrap();
    static ref DEF: Regex = Regex::new(&format!(r"(?m)^\s*def\s+{IDENT}")).unwrap();
    // No (?m): only an assignment at the very start of the text matches.
    static ref ASSIGNMENT: Regex = Regex::new(&format!(r"^\s*{IDENT}\s*=")).unwrap();

    static ref IF: Regex = Regex::new(r"(?m)^\s*if\s+").unwrap();
    static ref ELIF: Regex = Regex::new(r"(?m)^\s*elif\s+").unwrap();
    static ref BOOL_OP: Regex = Regex::new(r"\s+(and|or)\s+").unwrap();

    static ref FOR: Regex = Regex::new(r"(?m)^\s*for\s+").unwrap();
    static ref WHILE: Regex = Regex::new(r"(?m)^\s*while\s+").unwrap();

    static ref TRY: Regex = Regex::new(r"(?m)^\s*try\s*:").unwrap();
    static ref EXCEPT: Regex = Regex::new(r"(?m)^\s*except\s+").unwrap();
    static ref FINALLY: Regex = Regex::new(r"(?m)^\s*finally\s*:").unwrap();

    static ref CALL: Regex = Regex::new(&format!(r"\b({IDENT})\s*\(")).unwrap();
}

fn python_calls() -> CallScan {
    CallScan {
        pattern: &CALL,
        excluded: PYTHON_CALL_KEYWORDS,
    }
}

/// Pattern-based Python extractor.
#[derive(Debug, Default)]
pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl MetricExtractor for PythonExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::Python
    }

    fn extract(&self, _file_name: &str, code: &str) -> Result<Extraction, AnalyzeError> {
        let functions = count_matches(&DEF, code);
        let excepts = count_matches(&EXCEPT, code);

        // `and`/`or` stand in for branches.
        let conditionals =
            count_matches(&IF, code) + count_matches(&ELIF, code) + count_matches(&BOOL_OP, code);

        let counts = Counts {
            lines: total_lines(code),
            classes: count_matches(&CLASS, code),
            methods: functions,
            variables: count_matches(&ASSIGNMENT, code),
            conditionals,
            loops: count_matches(&FOR, code) + count_matches(&WHILE, code),
            exception_handling: count_matches(&TRY, code)
                + excepts
                + count_matches(&FINALLY, code),
        };
        trace!(?counts, "python counts");

        let cyclomatic = 1 + counts.conditionals + counts.loops + excepts;
        let depth = if functions > 0 { 2 } else { 1 };

        Ok(Extraction {
            metrics: Metrics::from_counts(counts, cyclomatic),
            flow: ProgramFlow::from_calls(python_calls().calls(code), depth),
        })
    }
}
