//! Offset to line-number lookup over the original, un-normalized text

use crate::error::LineIndexError;
use facet::Facet;

/// Byte range of one source line, newline included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
pub struct LineSpan {
    /// Offset of the first byte of the line
    pub start: usize,
    /// Offset just past the line's newline (or past the last byte of the text)
    pub end: usize,
}

/// Ordered line boundaries of a text, built once before any rewriting happens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<LineSpan>,
}

impl LineIndex {
    /// Index every newline boundary of `text`.
    ///
    /// A trailing segment without a newline gets its own span, so comments on
    /// an unterminated last line still resolve. Empty text yields an empty index.
    pub fn build(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;

        for (i, _) in text.match_indices('\n') {
            lines.push(LineSpan { start, end: i + 1 });
            start = i + 1;
        }

        if start < text.len() {
            lines.push(LineSpan {
                start,
                end: text.len(),
            });
        }

        Self { lines }
    }

    /// Build an index from explicit spans, without validating them
    pub fn from_spans(lines: Vec<LineSpan>) -> Self {
        Self { lines }
    }

    /// Resolve the 1-based line that contains the byte just before `end_offset`.
    ///
    /// The first span whose end reaches `end_offset` wins.
    pub fn resolve(&self, end_offset: usize) -> Result<usize, LineIndexError> {
        if self.lines.is_empty() {
            // degenerate single-line case
            return if end_offset == 0 {
                Ok(1)
            } else {
                Err(LineIndexError::NotFound { offset: end_offset })
            };
        }

        for (i, line) in self.lines.iter().enumerate() {
            if line.start > line.end {
                return Err(LineIndexError::Corrupt { line: i + 1 });
            }
            if line.end >= end_offset {
                return Ok(i + 1);
            }
        }

        Err(LineIndexError::NotFound { offset: end_offset })
    }

    /// Number of indexed lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the indexed text was empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn spans(&self) -> &[LineSpan] {
        &self.lines
    }
}
