//! BSV Frontend - Lexer, Parser and Syntax Tree
//!
//! This crate handles:
//! - Lexical analysis (tokenization, trivia included)
//! - Parsing BSV source into a lossless rowan syntax tree
//! - Typed AST views over the tree
//! - Diagnostics with line/column spans
//!
//! Parsing never fails: every input yields a tree, possibly paired with
//! diagnostics.
//!
//! ```
//! let (tree, diagnostics) = bsvsyn_frontend::parse("package Foo; endpackage");
//! assert!(diagnostics.is_empty());
//! assert_eq!(tree.text(), "package Foo; endpackage");
//! ```

pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod lexer;
pub mod operators;
pub mod parse;
pub mod span;
pub mod syntax;
pub mod tree;

pub use ast::AstNode;
pub use config::{Config, ConfigError, ParseConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use lexer::{tokenize, Lexer, Token, TokenWithPos};
pub use span::{LineIndex, SourceSpan};
pub use syntax::{SyntaxKind, SyntaxNode, SyntaxNodeExt, SyntaxToken};
pub use tree::SyntaxTree;

use tracing::debug;

/// Parse BSV source text with default limits
pub fn parse(source: &str) -> (SyntaxTree, Vec<Diagnostic>) {
    parse_with_config(source, &ParseConfig::default())
}

/// Parse BSV source text with explicit limits
pub fn parse_with_config(source: &str, config: &ParseConfig) -> (SyntaxTree, Vec<Diagnostic>) {
    debug!("parsing {} bytes (max depth {})", source.len(), config.max_depth);
    let result = parse::parse_green(source, *config);
    (
        SyntaxTree::new(result.green_node, result.line_index),
        result.errors,
    )
}
