//! Errors raised while analyzing a single source file.

use thiserror::Error;

/// Terminal failure for one file. No partial metrics accompany any variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("unsupported language for {file_name:?} (extension {extension:?})")]
    UnsupportedLanguage { file_name: String, extension: String },
    #[error("{file_name:?} is not valid UTF-8 text: {source}")]
    DecodingFailure {
        file_name: String,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("failed to parse {file_name:?}: {reason}")]
    ParseFailure { file_name: String, reason: String },
}

impl AnalyzeError {
    /// Stable tag used in JSON failure entries.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::UnsupportedLanguage { .. } => "unsupported_language",
            AnalyzeError::DecodingFailure { .. } => "decoding_failure",
            AnalyzeError::ParseFailure { .. } => "parse_failure",
        }
    }

    /// Name of the file that failed.
    pub fn file_name(&self) -> &str {
        match self {
            AnalyzeError::UnsupportedLanguage { file_name, .. }
            | AnalyzeError::DecodingFailure { file_name, .. }
            | AnalyzeError::ParseFailure { file_name, .. } => file_name,
        }
    }
}
