//! Per-file analysis pipeline and the parallel batch driver.
//!
//! A file moves through `Unparsed -> Extracted -> Aggregated -> Returned`.
//! A failure before extraction completes is terminal for that file and has no
//! effect on any other file.

use std::borrow::Cow;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::AnalyzeError;
use crate::extract::extractor_for;
use crate::language;
use crate::metrics::{aggregate, AnalysisResult};

/// A named source file ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Outcome for one file of a batch.
pub type FileOutcome = Result<AnalysisResult, AnalyzeError>;

/// Replace `\r\n` and lone `\r` with `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Analyze one file.
///
/// The dialect is chosen from `file_name` before the bytes are decoded, so an
/// unsupported extension fails without looking at the content.
pub fn analyze_source(file_name: &str, bytes: &[u8]) -> FileOutcome {
    let dialect = language::detect(file_name)?;

    let text = std::str::from_utf8(bytes).map_err(|source| AnalyzeError::DecodingFailure {
        file_name: file_name.to_string(),
        source,
    })?;
    let text = normalize_line_endings(text);

    let extraction = extractor_for(dialect).extract(file_name, &text)?;
    debug!(file = file_name, %dialect, "extracted");

    let metrics = aggregate(extraction.metrics);
    debug!(
        file = file_name,
        cyclomatic = metrics.cyclomatic_complexity,
        overall = metrics.overall_complexity,
        "aggregated"
    );

    Ok(AnalysisResult::new(file_name, metrics, extraction.flow))
}

/// Analyze many files in parallel.
///
/// Outcomes are returned in input order; a failing file is logged and
/// reported in place without stopping the others.
pub fn analyze_batch(files: &[SourceFile]) -> Vec<FileOutcome> {
    files
        .par_iter()
        .map(|file| {
            let outcome = analyze_source(&file.name, &file.bytes);
            if let Err(e) = &outcome {
                warn!(file = %file.name, kind = e.kind(), "analysis failed: {}", e);
            }
            outcome
        })
        .collect()
}
