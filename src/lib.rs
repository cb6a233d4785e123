//! smartmetrics - multi-language source metrics.
//!
//! Given a file name and its bytes, smartmetrics reports structural counts
//! (classes, methods, variables, conditionals, loops, exception handling), a
//! cyclomatic complexity, a quality score and an approximate program flow.
//!
//! # Architecture
//!
//! - `language`: picks the dialect from the file extension
//! - `extract`: one `MetricExtractor` per dialect (Java via tree-sitter,
//!   PHP and Python via regular expressions)
//! - `metrics`: result types and the overall-complexity aggregation
//! - `analyze`: the per-file pipeline and the parallel batch driver
//! - `config`, `report`, `cli`: the command-line front end
//!
//! Analysis of one file never touches shared mutable state, so any number of
//! files can be analyzed concurrently.
//!
//! ```no_run
//! let result = smartmetrics::analyze_source("Main.java", b"class Main {}")?;
//! assert_eq!(result.metrics().total_classes, 1);
//! # Ok::<(), smartmetrics::AnalyzeError>(())
//! ```

pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod language;
pub mod metrics;
pub mod report;

pub use analyze::{analyze_batch, analyze_source, normalize_line_endings, FileOutcome, SourceFile};
pub use config::Config;
pub use error::AnalyzeError;
pub use extract::{extractor_for, Extraction, MetricExtractor};
pub use language::{detect, Dialect};
pub use metrics::{aggregate, AnalysisResult, Metrics, ProgramFlow};
