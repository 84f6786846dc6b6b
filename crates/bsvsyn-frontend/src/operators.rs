//! Operator table for BSV expressions
//!
//! Binary operators have ten precedence levels, from `||` (1) up to the
//! multiplicative operators (10). All binary operators are left associative.
//! Prefix operators bind tighter than any binary operator.

use crate::syntax::SyntaxKind;
use serde::Serialize;
use std::fmt;

/// Precedence of prefix operators, above every binary level
pub const UNARY_PRECEDENCE: u8 = 11;

/// Binary infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    /// Operator for a token in infix position
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            SyntaxKind::PipePipe => BinaryOp::LogicalOr,
            SyntaxKind::AmpAmp => BinaryOp::LogicalAnd,
            SyntaxKind::Pipe => BinaryOp::BitOr,
            SyntaxKind::Caret => BinaryOp::BitXor,
            SyntaxKind::Amp => BinaryOp::BitAnd,
            SyntaxKind::Eq => BinaryOp::Eq,
            SyntaxKind::Neq => BinaryOp::Neq,
            SyntaxKind::Lt => BinaryOp::Lt,
            SyntaxKind::Le => BinaryOp::Le,
            SyntaxKind::Gt => BinaryOp::Gt,
            SyntaxKind::Ge => BinaryOp::Ge,
            SyntaxKind::Shl => BinaryOp::Shl,
            SyntaxKind::Shr => BinaryOp::Shr,
            SyntaxKind::Plus => BinaryOp::Add,
            SyntaxKind::Minus => BinaryOp::Sub,
            SyntaxKind::Star => BinaryOp::Mul,
            SyntaxKind::Slash => BinaryOp::Div,
            SyntaxKind::Percent => BinaryOp::Rem,
            _ => return None,
        };
        Some(op)
    }

    /// Binding strength, 1 (loosest) to 10
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::LogicalOr => 1,
            BinaryOp::LogicalAnd => 2,
            BinaryOp::BitOr => 3,
            BinaryOp::BitXor => 4,
            BinaryOp::BitAnd => 5,
            BinaryOp::Eq | BinaryOp::Neq => 6,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 7,
            BinaryOp::Shl | BinaryOp::Shr => 8,
            BinaryOp::Add | BinaryOp::Sub => 9,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 10,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Negate,
    /// `~`
    Invert,
    /// `&` reduction
    ReduceAnd,
    /// `|` reduction
    ReduceOr,
    /// `^` reduction
    ReduceXor,
}

impl UnaryOp {
    /// Operator for a token in prefix position
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            SyntaxKind::Bang => UnaryOp::Not,
            SyntaxKind::Minus => UnaryOp::Negate,
            SyntaxKind::Tilde => UnaryOp::Invert,
            SyntaxKind::Amp => UnaryOp::ReduceAnd,
            SyntaxKind::Pipe => UnaryOp::ReduceOr,
            SyntaxKind::Caret => UnaryOp::ReduceXor,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::Invert => "~",
            UnaryOp::ReduceAnd => "&",
            UnaryOp::ReduceOr => "|",
            UnaryOp::ReduceXor => "^",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
