//! Stream positions for tokens and diagnostics.

use std::fmt;

/// A position within the stream being lexed. Lines and columns are 1-based.
///
/// Positions are mutated only by the tokenizer as it consumes matched text.
/// Ordering is line-major, so "which failure got further" comparisons work
/// directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct StreamPosition {
    pub line: u64,
    pub column: u64,
}

impl StreamPosition {
    pub fn new(line: u64, column: u64) -> Self {
        Self { line, column }
    }

    /// Advance past `matched`. A match containing k newlines increases the
    /// line count by k and restarts the column after the last newline;
    /// otherwise the column grows by the match length in characters.
    pub(crate) fn advance(&mut self, matched: &str) {
        let newlines = matched.chars().filter(|&c| c == '\n').count() as u64;
        if newlines > 0 {
            let after_last = matched
                .rsplit('\n')
                .next()
                .unwrap_or("")
                .chars()
                .count() as u64;
            self.line += newlines;
            self.column = after_last + 1;
        } else {
            self.column += matched.chars().count() as u64;
        }
    }
}

impl Default for StreamPosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
