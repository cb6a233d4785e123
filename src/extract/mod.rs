//! Per-dialect metric extractors.
//!
//! Each dialect implements [`MetricExtractor`] and returns the same
//! [`Extraction`] shape, so nothing downstream needs to know which dialect
//! produced a result.
//!
//! # Adding a New Dialect
//!
//! 1. Add a variant to [`Dialect`](crate::language::Dialect)
//! 2. Create a module here implementing `MetricExtractor`
//! 3. Register it in [`extractor_for`]

mod java;
mod patterns;
mod php;
mod python;

pub use java::JavaExtractor;
pub use patterns::{count_matches, total_lines, CallScan, IDENT};
pub use php::{PhpExtractor, PHP_CALL_KEYWORDS};
pub use python::{PythonExtractor, PYTHON_CALL_KEYWORDS};

use once_cell::sync::OnceCell;

use crate::error::AnalyzeError;
use crate::language::Dialect;
use crate::metrics::{Metrics, ProgramFlow};

/// Output of one extractor run, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub metrics: Metrics,
    pub flow: ProgramFlow,
}

/// Dialect-specific metric extraction.
///
/// Implementations hold no mutable state; one instance serves any number of
/// threads.
pub trait MetricExtractor: Send + Sync {
    /// The dialect this extractor handles.
    fn dialect(&self) -> Dialect;

    /// Extract metrics from normalized source text (`\n` line endings).
    ///
    /// `file_name` is only used for error reporting.
    fn extract(&self, file_name: &str, source: &str) -> Result<Extraction, AnalyzeError>;
}

static JAVA_EXTRACTOR: OnceCell<JavaExtractor> = OnceCell::new();
static PHP_EXTRACTOR: OnceCell<PhpExtractor> = OnceCell::new();
static PYTHON_EXTRACTOR: OnceCell<PythonExtractor> = OnceCell::new();

/// Get the extractor for a dialect.
pub fn extractor_for(dialect: Dialect) -> &'static dyn MetricExtractor {
    match dialect {
        Dialect::Java => JAVA_EXTRACTOR.get_or_init(JavaExtractor::new),
        Dialect::Php => PHP_EXTRACTOR.get_or_init(PhpExtractor::new),
        Dialect::Python => PYTHON_EXTRACTOR.get_or_init(PythonExtractor::new),
    }
}
