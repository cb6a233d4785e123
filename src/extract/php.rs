//! PHP metrics from regular-expression scans.
//!
//! There is no parse tree: every count is a token pattern over the whole
//! text, so strings and comments are counted like code. Malformed input is
//! never rejected.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use super::patterns::{count_matches, saturating_u32, total_lines, CallScan, IDENT};
use super::{Extraction, MetricExtractor};
use crate::error::AnalyzeError;
use crate::language::Dialect;
use crate::metrics::{Counts, Metrics, ProgramFlow};

/// Identifiers never reported as PHP call targets (case-insensitive).
pub const PHP_CALL_KEYWORDS: &[&str] = &[
    "if", "else", "elseif", "endif", "while", "endwhile", "for", "endfor",
    "foreach", "endforeach", "switch", "endswitch", "case", "default",
    "break", "continue", "return", "try", "catch", "finally", "throw",
    "class", "function", "interface", "trait", "extends", "implements",
    "public", "private", "protected", "static", "abstract", "final",
    "const", "global", "var", "include", "include_once", "require",
    "require_once", "echo", "print", "die", "exit", "isset", "unset",
    "empty", "array", "new", "clone", "use", "namespace", "as",
];

lazy_static! {
    static ref FUNCTION: Regex = Regex::new(&format!(r"function\s+({IDENT})\s*\(")).unwrap();
    static ref VARIABLE: Regex = Regex::new(&format!(r"\${IDENT}")).unwrap();
    static ref CLASS: Regex = Regex::new(&format!(r"\bclass\s+{IDENT}")).unwrap();

    static ref IF: Regex = Regex::new(r"\bif\s*\(").unwrap();
    static ref ELSEIF: Regex = Regex::new(r"\belseif\s*\(").unwrap();
    static ref ELSE: Regex = Regex::new(r"\belse\b").unwrap();
    static ref SWITCH: Regex = Regex::new(r"\bswitch\s*\(").unwrap();
    static ref CASE: Regex = Regex::new(r"\bcase\s+").unwrap();

    static ref FOR: Regex = Regex::new(r"\bfor\s*\(").unwrap();
    static ref FOREACH: Regex = Regex::new(r"\bforeach\s*\(").unwrap();
    static ref WHILE: Regex = Regex::new(r"\bwhile\s*\(").unwrap();
    static ref DO: Regex = Regex::new(r"\bdo\s*\{").unwrap();

    static ref TRY: Regex = Regex::new(r"\btry\s*\{").unwrap();
    static ref CATCH: Regex = Regex::new(r"\bcatch\s*\(").unwrap();
    static ref FINALLY: Regex = Regex::new(r"\bfinally\s*\{").unwrap();
    static ref THROW: Regex = Regex::new(r"\bthrow\s+").unwrap();

    static ref CALL: Regex = Regex::new(&format!(r"({IDENT})\s*\(")).unwrap();
}

fn php_calls() -> CallScan {
    CallScan {
        pattern: &CALL,
        excluded: PHP_CALL_KEYWORDS,
    }
}

/// Pattern-based PHP extractor.
#[derive(Debug, Default)]
pub struct PhpExtractor;

impl PhpExtractor {
    pub fn new() -> Self {
        Self
    }

    /// `else` branches, skipping the `else if` spelling (one space only).
    fn count_else(&self, code: &str) -> u32 {
        let plain = ELSE
            .find_iter(code)
            .filter(|m| !code[m.start()..].starts_with("else if"))
            .count();
        saturating_u32(plain)
    }

    fn count_conditionals(&self, code: &str) -> u32 {
        // Every `case` label is a conditional of its own.
        count_matches(&IF, code)
            + count_matches(&ELSEIF, code)
            + self.count_else(code)
            + count_matches(&SWITCH, code)
            + count_matches(&CASE, code)
    }

    fn count_loops(&self, code: &str) -> u32 {
        count_matches(&FOR, code)
            + count_matches(&FOREACH, code)
            + count_matches(&WHILE, code)
            + count_matches(&DO, code)
    }
}

impl MetricExtractor for PhpExtractor {
    fn dialect(&self) -> Dialect {
        Dialect::Php
    }

    fn extract(&self, _file_name: &str, code: &str) -> Result<Extraction, AnalyzeError> {
        let functions = count_matches(&FUNCTION, code);
        let catches = count_matches(&CATCH, code);

        let counts = Counts {
            lines: total_lines(code),
            classes: count_matches(&CLASS, code),
            methods: functions,
            variables: count_matches(&VARIABLE, code),
            conditionals: self.count_conditionals(code),
            loops: self.count_loops(code),
            exception_handling: count_matches(&TRY, code)
                + catches
                + count_matches(&FINALLY, code)
                + count_matches(&THROW, code),
        };
        trace!(?counts, "php counts");

        // Catch blocks count here and in exception handling.
        let cyclomatic = 1 + counts.conditionals + counts.loops + catches;
        let depth = if functions > 0 { 2 } else { 1 };

        Ok(Extraction {
            metrics: Metrics::from_counts(counts, cyclomatic),
            flow: ProgramFlow::from_calls(php_calls().calls(code), depth),
        })
    }
}
