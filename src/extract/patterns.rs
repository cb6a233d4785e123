//! Pattern layer shared by the regex-driven dialects.
//!
//! The `regex` crate matches in linear time, so none of these scans can
//! backtrack catastrophically on adversarial input.

use regex::Regex;

/// Identifier token used by every dialect pattern.
pub const IDENT: &str = "[a-zA-Z_][a-zA-Z0-9_]*";

/// Number of non-overlapping matches of `pattern` in `text`.
pub fn count_matches(pattern: &Regex, text: &str) -> u32 {
    saturating_u32(pattern.find_iter(text).count())
}

/// Newline-delimited segments with trailing empty segments dropped.
///
/// Empty text, and text made only of newlines, count as one line.
pub fn total_lines(text: &str) -> u32 {
    let trimmed = text.trim_end_matches('\n');
    if trimmed.is_empty() {
        return 1;
    }
    saturating_u32(trimmed.matches('\n').count() + 1)
}

pub(crate) fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// How a dialect finds call targets in raw text.
pub struct CallScan {
    /// Pattern whose first group is the callee identifier.
    pub pattern: &'static Regex,
    /// Identifiers rejected as call targets, compared case-insensitively.
    pub excluded: &'static [&'static str],
}

impl CallScan {
    /// Callee names in source order, keywords removed, duplicates kept.
    pub fn calls<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .filter(move |name| !self.is_excluded(name))
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|kw| kw.eq_ignore_ascii_case(name))
    }
}
