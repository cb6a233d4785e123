//! Dialect detection from file names.
//!
//! The extension is the only input: no content sniffing is done, so an
//! unsupported name is rejected before any byte of the file is looked at.

use crate::error::AnalyzeError;

/// A supported source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Java,
    Php,
    Python,
}

impl Dialect {
    /// All dialects, in detection order.
    pub const ALL: [Dialect; 3] = [Dialect::Java, Dialect::Php, Dialect::Python];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Java => "java",
            Dialect::Php => "php",
            Dialect::Python => "python",
        }
    }

    /// File extension (without dot) handled by this dialect.
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::Java => "java",
            Dialect::Php => "php",
            Dialect::Python => "py",
        }
    }

    /// Map a lower-case extension to a dialect.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "java" => Some(Dialect::Java),
            "php" => Some(Dialect::Php),
            "py" => Some(Dialect::Python),
            _ => None,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lower-cased text after the last `.` of the file name, or "" when there is none.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Select the dialect for a file name.
pub fn detect(file_name: &str) -> Result<Dialect, AnalyzeError> {
    let extension = extension_of(file_name);
    Dialect::from_extension(&extension).ok_or_else(|| AnalyzeError::UnsupportedLanguage {
        file_name: file_name.to_string(),
        extension,
    })
}

/// Whether a file name belongs to any supported dialect.
pub fn is_supported(file_name: &str) -> bool {
    detect(file_name).is_ok()
}
