//! Parse diagnostics
//!
//! Every problem found while lexing or parsing is reported as a
//! [`Diagnostic`] value; parsing itself never fails.

use crate::span::SourceSpan;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Diagnostic severity. The parser only produces errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Where a diagnostic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Unrecognized character, unterminated string, comment or attribute
    Lexical,
    /// Expected keyword or punctuation not found
    Structural,
    /// A production chosen by lookahead did not complete
    Ambiguity,
    /// Input ended inside one or more open constructs
    UnexpectedEof,
}

/// A single parse problem with its location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: SourceSpan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// Byte offset where the diagnostic starts
    pub fn position(&self) -> usize {
        self.span.start
    }

    /// Render as `file:line:col: error: message`
    pub fn render(&self) -> String {
        format!("{}: {}: {}", self.span.display(), self.severity, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::LineIndex;
    use std::path::PathBuf;

    #[test]
    fn test_render() {
        let index = LineIndex::new("rule r;\nx <= ;");
        let span = SourceSpan::at_offset(13, &index).with_file(PathBuf::from("a.bsv"));
        let diag = Diagnostic::error(DiagnosticKind::Structural, "expected expression", span)
            .with_found("';'");

        assert_eq!(diag.render(), "a.bsv:2:6: error: expected expression");
        assert_eq!(diag.to_string(), "expected expression");
        assert_eq!(diag.position(), 13);
    }

    #[test]
    fn test_serialize() {
        let index = LineIndex::new("x");
        let diag = Diagnostic::error(
            DiagnosticKind::UnexpectedEof,
            "unexpected end of input",
            SourceSpan::at_offset(1, &index),
        );
        let json = serde_json::to_value(&diag).unwrap();

        assert_eq!(json["severity"], "error");
        assert_eq!(json["kind"], "unexpected_eof");
        assert_eq!(json["span"]["column"], 2);
        assert!(json.get("expected").is_none());
    }
}
