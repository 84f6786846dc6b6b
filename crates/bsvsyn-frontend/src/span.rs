//! Source span and location types for diagnostics
//!
//! Byte offsets from the parser are converted to 1-indexed line and
//! column positions through a [`LineIndex`].

use rowan::{TextRange, TextSize};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source location with full context for error reporting
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// File path (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Byte offset in source (start)
    pub start: usize,
    /// Byte offset in source (end, exclusive)
    pub end: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in bytes)
    pub column: usize,
    /// End line (for multi-line spans)
    pub end_line: usize,
    /// End column
    pub end_column: usize,
}

impl SourceSpan {
    /// Create an empty span at a single offset
    pub fn at_offset(offset: usize, line_index: &LineIndex) -> Self {
        Self::from_offset_range(offset, offset, line_index)
    }

    /// Create span from byte offset range using line index
    pub fn from_offset_range(start: usize, end: usize, line_index: &LineIndex) -> Self {
        let (line, column) = line_index.line_col(start);
        let (end_line, end_column) = line_index.line_col(end);
        Self {
            file: None,
            start,
            end,
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// Create span from a rowan text range
    pub fn from_text_range(range: TextRange, line_index: &LineIndex) -> Self {
        Self::from_offset_range(range.start().into(), range.end().into(), line_index)
    }

    /// Create span with file path
    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    /// Byte range as a rowan text range, if both offsets fit in a `u32`
    pub fn text_range(&self) -> Option<TextRange> {
        let start = u32::try_from(self.start).ok().map(TextSize::from)?;
        let end = u32::try_from(self.end).ok().map(TextSize::from)?;
        Some(TextRange::new(start, end))
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Format as "file:line:column" for error messages
    pub fn display(&self) -> String {
        let file_str = self
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());
        format!("{}:{}:{}", file_str, self.line, self.column)
    }
}

/// Index for converting byte offsets to line:column positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of start of each line
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    /// Convert byte offset to (line, column), both 1-indexed
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        };

        let line_start = self
            .line_starts
            .get(line.saturating_sub(1))
            .copied()
            .unwrap_or(0);
        let column = offset.saturating_sub(line_start) + 1;
        (line, column)
    }
}
