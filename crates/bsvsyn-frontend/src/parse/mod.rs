//! Rowan-based parser for BSV
//!
//! This module implements the parsing logic using Rowan's GreenNodeBuilder.
//! Grammar rules are split by area: declarations in `items`, statements in
//! `stmt`, expressions in `expr`, types in `types`, and the lookahead used to
//! pick between overlapping productions in `disambiguate`.
//!
//! Trivia tokens are written into the tree as they are passed over, so the
//! text of the resulting tree is always identical to the input.

mod disambiguate;
mod expr;
mod items;
mod stmt;
mod types;

use crate::config::ParseConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::lexer::{Lexer, Token, TokenWithPos};
use crate::span::{LineIndex, SourceSpan};
use crate::syntax::{SyntaxKind, SyntaxNode};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use tracing::{debug, trace};

/// Parser state for building Rowan trees
pub struct ParseState<'a> {
    /// Tokens from lexer, trivia included
    tokens: Vec<TokenWithPos>,
    /// Index of the next token not yet written to the tree
    current: usize,
    /// Green node builder
    builder: GreenNodeBuilder<'static>,
    /// Source text
    source: &'a str,
    line_index: LineIndex,
    config: ParseConfig,
    /// Structural diagnostics, in the order they were found
    errors: Vec<Diagnostic>,
    /// Diagnostics carried by the tokens themselves
    lexical_errors: Vec<Diagnostic>,
    /// Token index of the `]` closing each `[`, if it closes before a `;`,
    /// block closer or declaration keyword
    bracket_matches: Vec<Option<usize>>,
    /// Current expression/statement/type nesting
    depth: usize,
    /// Blocks whose closing keyword has not been consumed yet
    open_blocks: Vec<OpenBlock>,
    /// Set once a diagnostic has been reported at end of input
    eof_reported: bool,
}

#[derive(Debug, Clone, Copy)]
struct OpenBlock {
    closer: SyntaxKind,
    construct: &'static str,
}

impl<'a> ParseState<'a> {
    /// Create a new parser state
    pub fn new(source: &'a str, config: ParseConfig) -> Self {
        let tokens = Lexer::new(source).tokenize();
        let line_index = LineIndex::new(source);

        let lexical_errors = tokens
            .iter()
            .filter_map(|token| {
                let message = token.token.lexical_error()?;
                let text = &source[token.span.clone()];
                let message = match token.token {
                    Token::Error => format!("{} '{}'", message, text.escape_debug()),
                    _ => message.to_string(),
                };
                let span =
                    SourceSpan::from_offset_range(token.span.start, token.span.end, &line_index);
                Some(Diagnostic::error(DiagnosticKind::Lexical, message, span))
            })
            .collect();
        let bracket_matches = disambiguate::match_brackets(&tokens);

        Self {
            tokens,
            current: 0,
            builder: GreenNodeBuilder::new(),
            source,
            line_index,
            config,
            errors: Vec::new(),
            lexical_errors,
            bracket_matches,
            depth: 0,
            open_blocks: Vec::new(),
            eof_reported: false,
        }
    }

    /// Parse the source file
    pub fn parse_source_file(mut self) -> ParseResult {
        debug!("parsing {} tokens", self.tokens.len());
        self.start_node(SyntaxKind::SourceFile);

        while !self.is_at_end() {
            self.parse_definition();
        }

        // Trailing whitespace and comments belong to the file
        self.flush_trivia();
        self.finish_node();

        let mut errors = self.errors;
        errors.extend(self.lexical_errors);
        errors.sort_by_key(|e| e.span.start);
        debug!("parse finished with {} diagnostics", errors.len());

        ParseResult {
            green_node: self.builder.finish(),
            errors,
            line_index: self.line_index,
        }
    }

    // === Helper methods ===

    /// Start a new syntax node; pending trivia stays outside of it
    fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    /// Finish the current syntax node
    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Take a checkpoint for wrapping already-parsed children later
    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Wrap everything since `checkpoint` in a node of `kind`
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    /// Write pending trivia tokens into the tree
    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.current) {
            let kind = SyntaxKind::from(token.token);
            if !kind.is_trivia() {
                break;
            }
            let text = &self.source[token.span.clone()];
            self.builder.token(kind.into(), text);
            self.current += 1;
        }
    }

    /// Index of the n-th non-trivia token from the current position
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.current..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.token.is_trivia())
            .nth(n)
            .map(|(i, _)| self.current + i)
    }

    /// Kinds of the remaining non-trivia tokens
    fn significant_kinds(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        self.tokens[self.current..]
            .iter()
            .filter(|t| !t.token.is_trivia())
            .map(|t| SyntaxKind::from(t.token))
    }

    /// Get current token kind
    fn current_kind(&self) -> Option<SyntaxKind> {
        self.peek_kind(0)
    }

    /// Get current token
    fn current_token(&self) -> Option<&TokenWithPos> {
        self.nth_index(0).map(|i| &self.tokens[i])
    }

    /// Peek at a token without consuming it
    fn peek_kind(&self, offset: usize) -> Option<SyntaxKind> {
        self.nth_index(offset)
            .map(|i| SyntaxKind::from(self.tokens[i].token))
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.nth_index(0).is_none()
    }

    /// Check if current token is of given kind
    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Check if the current token closes a block or starts a new declaration
    fn at_block_boundary(&self) -> bool {
        self.current_kind().is_some_and(|k| {
            k.is_block_closer() || k.is_definition_start() || k.is_member_start()
        })
    }

    /// Consume current token
    fn bump(&mut self) {
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.current) {
            let kind = SyntaxKind::from(token.token);
            let text = &self.source[token.span.clone()];
            self.builder.token(kind.into(), text);
            self.current += 1;
        }
    }

    /// Expect a specific token kind
    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.report(
                DiagnosticKind::Structural,
                format!("expected {}", kind.description()),
                Some(kind.description().to_string()),
            );
            false
        }
    }

    /// Expect a token that completes a production chosen by lookahead;
    /// the message names the interpretation that was attempted
    fn expect_in(&mut self, kind: SyntaxKind, context: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.report(
                DiagnosticKind::Ambiguity,
                format!("expected {} {}", kind.description(), context),
                Some(kind.description().to_string()),
            );
            false
        }
    }

    /// Wrap an identifier in a `Name` node
    fn expect_name(&mut self, what: &str) {
        if self.at(SyntaxKind::Ident) {
            self.start_node(SyntaxKind::Name);
            self.bump();
            self.finish_node();
        } else {
            self.report(
                DiagnosticKind::Structural,
                format!("expected {} name", what),
                Some("identifier".to_string()),
            );
        }
    }

    /// Record that a block was opened and must be closed by `closer`
    fn open_block(&mut self, closer: SyntaxKind, construct: &'static str) {
        self.open_blocks.push(OpenBlock { closer, construct });
    }

    /// Consume the closing keyword of the innermost open block and its
    /// optional `: label`. A missing closer is reported, not consumed.
    fn expect_closer(&mut self, closer: SyntaxKind) {
        if self.at(closer) {
            self.bump();
            self.parse_end_label();
        } else {
            self.report(
                DiagnosticKind::Structural,
                format!("expected {}", closer.description()),
                Some(closer.description().to_string()),
            );
        }
        self.open_blocks.pop();
    }

    /// Optional `: identifier` after a block closer; not checked against the block name
    fn parse_end_label(&mut self) {
        if self.at(SyntaxKind::Colon) && self.peek_kind(1) == Some(SyntaxKind::Ident) {
            self.start_node(SyntaxKind::EndLabel);
            self.bump();
            self.bump();
            self.finish_node();
        }
    }

    /// Enter a nested expression, statement or type
    fn enter(&mut self) -> bool {
        if self.depth >= self.config.max_depth {
            self.report(
                DiagnosticKind::Structural,
                format!("nesting exceeds the limit of {}", self.config.max_depth),
                None,
            );
            if !self.at_block_boundary() {
                self.skip_until(|k| {
                    k == SyntaxKind::Semicolon
                        || k.is_block_closer()
                        || k.is_definition_start()
                        || k.is_member_start()
                });
            }
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Report an error
    fn error(&mut self, message: &str) {
        self.report(DiagnosticKind::Structural, message.to_string(), None);
    }

    /// Report an error and consume the current token into an error node
    fn error_and_bump(&mut self, message: &str) {
        self.error(message);
        if !self.is_at_end() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Report an error, then skip the current token and everything up to
    /// the next token accepted by `stop`. With `through_semicolon`, a `;`
    /// ends the skipped region and is consumed with it.
    fn recover(&mut self, message: &str, stop: fn(SyntaxKind) -> bool, through_semicolon: bool) {
        self.error(message);
        if self.is_at_end() {
            return;
        }
        trace!("recovering at token {}", self.current);

        self.start_node(SyntaxKind::Error);
        let mut last = self.current_kind();
        self.bump();
        while let Some(kind) = self.current_kind() {
            if through_semicolon && last == Some(SyntaxKind::Semicolon) {
                break;
            }
            if stop(kind) {
                break;
            }
            last = Some(kind);
            self.bump();
        }
        self.finish_node();
    }

    /// Skip tokens into an error node until `stop` accepts the current token
    fn skip_until(&mut self, stop: impl Fn(SyntaxKind) -> bool) {
        if self.current_kind().map_or(true, &stop) {
            return;
        }
        self.start_node(SyntaxKind::Error);
        while let Some(kind) = self.current_kind() {
            if stop(kind) {
                break;
            }
            self.bump();
        }
        self.finish_node();
    }

    /// Report a specific error type at the current token
    fn report(&mut self, kind: DiagnosticKind, message: String, expected: Option<String>) {
        let Some(token) = self.current_token() else {
            self.report_eof(kind, message, expected);
            return;
        };

        // The lexer already reported this token
        if token.token == Token::Error {
            return;
        }

        let span = token.span.clone();
        let found = format!("'{}'", &self.source[span.clone()]);

        // One diagnostic per position; later ones are cascades of the first
        if self.errors.last().is_some_and(|e| e.span.start == span.start) {
            return;
        }

        let span = SourceSpan::from_offset_range(span.start, span.end, &self.line_index);
        let mut diagnostic = Diagnostic::error(kind, message, span).with_found(found);
        diagnostic.expected = expected;
        self.errors.push(diagnostic);
    }

    /// Only the first complaint at end of input is kept
    fn report_eof(&mut self, kind: DiagnosticKind, message: String, expected: Option<String>) {
        if self.eof_reported {
            return;
        }
        self.eof_reported = true;

        let span = SourceSpan::at_offset(self.source.len(), &self.line_index);
        let diagnostic = if self.open_blocks.is_empty() {
            let mut diagnostic = Diagnostic::error(kind, message, span);
            diagnostic.expected = expected;
            diagnostic
        } else {
            let unclosed: Vec<String> = self
                .open_blocks
                .iter()
                .rev()
                .map(|b| format!("{} (expected {})", b.construct, b.closer.description()))
                .collect();
            Diagnostic::error(
                DiagnosticKind::UnexpectedEof,
                format!("unexpected end of input; unclosed {}", unclosed.join(", ")),
                span,
            )
        };
        self.errors.push(diagnostic.with_found("end of input"));
    }
}

/// Parse result containing the syntax tree and any errors
pub struct ParseResult {
    pub green_node: GreenNode,
    pub errors: Vec<Diagnostic>,
    pub line_index: LineIndex,
}

/// Parse with explicit limits
pub fn parse_green(source: &str, config: ParseConfig) -> ParseResult {
    ParseState::new(source, config).parse_source_file()
}

/// Parse with error reporting
pub fn parse_with_errors(source: &str) -> (SyntaxNode, Vec<Diagnostic>) {
    let result = parse_green(source, ParseConfig::default());
    (SyntaxNode::new_root(result.green_node), result.errors)
}
