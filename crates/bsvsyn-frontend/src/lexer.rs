//! BSV Lexer using Logos
//!
//! Tokenizes BSV source code into a stream of tokens with position information.
//! Whitespace and comments are kept in the stream so that the parser can
//! rebuild the exact input text.

use logos::Logos;
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;

/// Token types for BSV
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // Declarations
    #[token("package")]
    Package,
    #[token("endpackage")]
    EndPackage,
    #[token("import")]
    Import,
    #[token("export")]
    Export,
    #[token("module")]
    Module,
    #[token("endmodule")]
    EndModule,
    #[token("interface")]
    Interface,
    #[token("endinterface")]
    EndInterface,
    #[token("typedef")]
    Typedef,
    #[token("enum")]
    Enum,
    #[token("struct")]
    Struct,
    #[token("deriving")]
    Deriving,
    #[token("function")]
    Function,
    #[token("endfunction")]
    EndFunction,
    #[token("rule")]
    Rule,
    #[token("endrule")]
    EndRule,
    #[token("method")]
    Method,
    #[token("endmethod")]
    EndMethod,

    // Control Flow
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("case")]
    Case,
    #[token("endcase")]
    EndCase,
    #[token("default")]
    Default,
    #[token("return")]
    Return,

    // Boolean Literals
    #[token("True")]
    True,
    #[token("False")]
    False,

    // Primitive Types
    #[token("Bit")]
    Bit,
    #[token("Int")]
    Int,
    #[token("UInt")]
    UInt,
    #[token("Bool")]
    Bool,
    #[token("void")]
    Void,
    #[token("Integer")]
    Integer,
    #[token("String")]
    String,
    #[token("Reg")]
    Reg,
    #[token("Wire")]
    Wire,
    #[token("FIFO")]
    Fifo,
    #[token("Vector")]
    Vector,
    #[token("Action")]
    Action,
    #[token("ActionValue")]
    ActionValue,
    #[token("Rules")]
    Rules,
    #[token("Module")]
    ModuleType,

    // Identifiers and literals
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]+")]
    IntLiteral,

    #[regex(r"[0-9]+\.[0-9]+")]
    RealLiteral,

    // Sized literals: 8'hFF, 4'b1010, 16'd42
    #[regex(r"[0-9]+'[bBoOdDhH][0-9a-fA-F_]+")]
    SizedLiteral,

    /// `true` when the closing quote was found
    #[token("\"", lex_string)]
    StringLiteral(bool),

    // Operators
    #[token("||")]
    LogicalOr,
    #[token("&&")]
    LogicalAnd,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&")]
    Ampersand,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("=")]
    Assign,
    #[token("<-")]
    LeftArrow,
    #[token("#")]
    Hash,

    // Delimiters
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Trivia
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    /// `true` when the closing `*/` was found
    #[token("/*", lex_block_comment)]
    BlockComment(bool),

    /// `(* ... *)` attribute, `true` when the closing `*)` was found
    #[token("(*", lex_attribute)]
    Attribute(bool),

    /// Unrecognized input, always a single character
    Error,
}

fn lex_string(lex: &mut logos::Lexer<Token>) -> Option<bool> {
    Some(lex_until(lex, "\""))
}

fn lex_block_comment(lex: &mut logos::Lexer<Token>) -> Option<bool> {
    Some(lex_until(lex, "*/"))
}

fn lex_attribute(lex: &mut logos::Lexer<Token>) -> Option<bool> {
    Some(lex_until(lex, "*)"))
}

/// Extend the current token through `terminator`, or to end of input when it is missing
fn lex_until(lex: &mut logos::Lexer<Token>, terminator: &str) -> bool {
    match lex.remainder().find(terminator) {
        Some(end) => {
            lex.bump(end + terminator.len());
            true
        }
        None => {
            let rest = lex.remainder().len();
            lex.bump(rest);
            false
        }
    }
}

impl Token {
    /// Whitespace, comments and attributes
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::LineComment | Token::BlockComment(_) | Token::Attribute(_)
        )
    }

    /// Describe a lexical problem carried by this token, if any
    pub fn lexical_error(self) -> Option<&'static str> {
        match self {
            Token::Error => Some("unrecognized character"),
            Token::StringLiteral(false) => Some("unterminated string literal"),
            Token::BlockComment(false) => Some("unterminated block comment"),
            Token::Attribute(false) => Some("unterminated attribute"),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier => write!(f, "identifier"),
            Token::IntLiteral | Token::RealLiteral | Token::SizedLiteral => write!(f, "number"),
            Token::StringLiteral(_) => write!(f, "string literal"),
            Token::Whitespace => write!(f, "whitespace"),
            Token::LineComment | Token::BlockComment(_) => write!(f, "comment"),
            Token::Attribute(_) => write!(f, "attribute"),
            Token::Error => write!(f, "invalid character"),
            _ => write!(f, "{:?}", self),
        }
    }
}

/// Radix of a sized literal's base letter
pub fn sized_literal_radix(base: char) -> Option<u32> {
    match base.to_ascii_lowercase() {
        'b' => Some(2),
        'o' => Some(8),
        'd' => Some(10),
        'h' => Some(16),
        _ => None,
    }
}

/// Split a sized literal (e.g., 8'hFF) into width, base letter and digits
pub fn split_sized_literal(input: &str) -> Option<(u32, char, &str)> {
    let (width, rest) = input.split_once('\'')?;
    let width = width.parse::<u32>().ok()?;
    let mut chars = rest.chars();
    let base = chars.next()?;
    sized_literal_radix(base)?;
    Some((width, base, chars.as_str()))
}

/// Value of a sized literal, ignoring underscores
pub fn parse_sized_literal(input: &str) -> Option<u64> {
    let (_, base, digits) = split_sized_literal(input)?;
    let radix = sized_literal_radix(base)?;
    u64::from_str_radix(&digits.replace('_', ""), radix).ok()
}

/// Parse decimal literal
pub fn parse_decimal(input: &str) -> Option<u64> {
    input.parse::<u64>().ok()
}

/// Token with position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithPos {
    pub token: Token,
    pub span: Range<usize>,
}

/// BSV Lexer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    pending: VecDeque<TokenWithPos>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: Token::lexer(source),
            pending: VecDeque::new(),
        }
    }

    /// Get the next token with position
    pub fn next_token(&mut self) -> Option<TokenWithPos> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        let result = self.inner.next()?;
        let span = self.inner.span();
        match result {
            Ok(token) => Some(TokenWithPos { token, span }),
            Err(()) => {
                // One error token per character keeps recovery local
                let slice = self.inner.slice();
                for (offset, ch) in slice.char_indices() {
                    let start = span.start + offset;
                    self.pending.push_back(TokenWithPos {
                        token: Token::Error,
                        span: start..start + ch.len_utf8(),
                    });
                }
                self.pending.pop_front()
            }
        }
    }

    /// Tokenize entire source into a vector
    pub fn tokenize(&mut self) -> Vec<TokenWithPos> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

impl Iterator for Lexer<'_> {
    type Item = TokenWithPos;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize `source`, trivia included
pub fn tokenize(source: &str) -> Vec<TokenWithPos> {
    Lexer::new(source).tokenize()
}
