//! The parsed syntax tree handed to callers

use crate::ast::SourceFile;
use crate::span::{LineIndex, SourceSpan};
use crate::syntax::{SyntaxNode, SyntaxToken};
use rowan::{GreenNode, TextRange, TextSize};

/// An immutable, lossless syntax tree for one input
///
/// Only the green tree is stored, so the value is `Send + Sync`; cursor
/// nodes are created on demand by [`SyntaxTree::syntax`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    green: GreenNode,
    line_index: LineIndex,
}

impl SyntaxTree {
    pub(crate) fn new(green: GreenNode, line_index: LineIndex) -> Self {
        Self { green, line_index }
    }

    /// Root node (kind `SourceFile`)
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Typed view of the root
    pub fn source_file(&self) -> SourceFile {
        SourceFile(self.syntax())
    }

    /// The exact input text, reconstructed from tokens and trivia
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// 1-indexed line and column of a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.line_index.line_col(offset)
    }

    /// Span of a node, excluding trivia before its first token
    pub fn span(&self, node: &SyntaxNode) -> SourceSpan {
        self.span_of(node.text_range())
    }

    pub fn token_span(&self, token: &SyntaxToken) -> SourceSpan {
        self.span_of(token.text_range())
    }

    pub fn span_of(&self, range: TextRange) -> SourceSpan {
        SourceSpan::from_text_range(range, &self.line_index)
    }

    /// Token covering `offset`; at a boundary between two tokens the one
    /// starting there is returned
    pub fn token_at(&self, offset: usize) -> Option<SyntaxToken> {
        let root = self.syntax();
        let offset = u32::try_from(offset).ok().map(TextSize::from)?;
        if offset >= root.text_range().end() {
            return None;
        }
        root.token_at_offset(offset).right_biased()
    }

    /// Whitespace or comment covering `offset`
    pub fn trivia_at(&self, offset: usize) -> Option<SyntaxToken> {
        self.token_at(offset).filter(|t| t.kind().is_trivia())
    }

    /// Trivia directly before `token`, in source order
    pub fn leading_trivia(&self, token: &SyntaxToken) -> Vec<SyntaxToken> {
        let mut trivia = Vec::new();
        let mut current = token.prev_token();
        while let Some(prev) = current {
            if !prev.kind().is_trivia() {
                break;
            }
            current = prev.prev_token();
            trivia.push(prev);
        }
        trivia.reverse();
        trivia
    }

    /// Trivia after `token` on the same line
    pub fn trailing_trivia(&self, token: &SyntaxToken) -> Vec<SyntaxToken> {
        let mut trivia = Vec::new();
        let mut current = token.next_token();
        while let Some(next) = current {
            if !next.kind().is_trivia() || next.text().contains('\n') {
                break;
            }
            current = next.next_token();
            trivia.push(next);
        }
        trivia
    }

    /// Indented dump of every node and token with its byte range
    pub fn debug_dump(&self) -> String {
        format!("{:#?}", self.syntax())
    }
}
