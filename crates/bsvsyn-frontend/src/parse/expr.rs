//! Expression parsing by precedence climbing

use super::ParseState;
use crate::operators::{BinaryOp, UnaryOp};
use crate::syntax::SyntaxKind;

impl ParseState<'_> {
    /// Parse expression
    pub(super) fn parse_expression(&mut self) {
        if !self.enter() {
            return;
        }
        self.parse_binary_expr(1);
        self.leave();
    }

    /// Parse a chain of binary operators binding at least as tight as `min_precedence`
    fn parse_binary_expr(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary_expr();

        while let Some(op) = self.current_kind().and_then(BinaryOp::from_kind) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            // Wrapping at the same checkpoint makes the chain left associative
            self.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
            self.bump();
            self.parse_binary_expr(precedence + 1);
            self.finish_node();
        }
    }

    /// Parse prefix operators (! - ~ & | ^)
    fn parse_unary_expr(&mut self) {
        if self.current_kind().and_then(UnaryOp::from_kind).is_some() {
            if !self.enter() {
                return;
            }
            self.start_node(SyntaxKind::UnaryExpr);
            self.bump();
            self.parse_unary_expr();
            self.finish_node();
            self.leave();
        } else {
            self.parse_postfix_expr();
        }
    }

    /// Parse a primary expression followed by member access, bit selects and calls
    fn parse_postfix_expr(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.parse_primary_expr() {
            return;
        }

        loop {
            match self.current_kind() {
                Some(SyntaxKind::Dot) => {
                    self.start_node_at(checkpoint, SyntaxKind::MemberExpr);
                    self.bump();
                    if self.at(SyntaxKind::Ident) {
                        self.bump();
                    } else {
                        self.error("expected field name after '.'");
                    }
                    self.finish_node();
                }
                Some(SyntaxKind::LBracket) => {
                    self.start_node_at(checkpoint, SyntaxKind::BitSelectExpr);
                    self.bump();
                    self.parse_expression();
                    if self.at(SyntaxKind::Colon) {
                        self.bump();
                        self.parse_expression();
                    }
                    self.expect(SyntaxKind::RBracket);
                    self.finish_node();
                }
                Some(SyntaxKind::LParen) => {
                    self.start_node_at(checkpoint, SyntaxKind::CallExpr);
                    self.parse_argument_list();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// Returns false when no expression could be parsed
    fn parse_primary_expr(&mut self) -> bool {
        match self.current_kind() {
            Some(SyntaxKind::Ident) => {
                self.start_node(SyntaxKind::IdentExpr);
                self.bump();
                self.finish_node();
            }
            Some(kind) if kind.is_literal() => {
                self.start_node(SyntaxKind::LiteralExpr);
                self.bump();
                self.finish_node();
            }
            Some(SyntaxKind::LParen) => {
                self.start_node(SyntaxKind::ParenExpr);
                self.bump();
                self.parse_expression();
                self.expect(SyntaxKind::RParen);
                self.finish_node();
            }
            Some(SyntaxKind::LBrace) => self.parse_bit_concat(),
            _ => {
                self.error("expected expression");
                if self.current_kind().is_some_and(|k| !ends_expression_recovery(k)) {
                    self.start_node(SyntaxKind::Error);
                    self.bump();
                    self.finish_node();
                }
                return false;
            }
        }
        true
    }

    /// { expression (, expression)* }
    fn parse_bit_concat(&mut self) {
        self.start_node(SyntaxKind::BitConcatExpr);
        self.bump();
        loop {
            self.parse_expression();
            if self.at(SyntaxKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect(SyntaxKind::RBrace);
        self.finish_node();
    }

    /// ( (expression (, expression)*)? )
    fn parse_argument_list(&mut self) {
        self.start_node(SyntaxKind::ArgumentList);
        self.bump();
        if !self.at(SyntaxKind::RParen) {
            loop {
                self.parse_expression();
                if self.at(SyntaxKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::RParen);
        self.finish_node();
    }
}

/// Tokens a failed primary expression leaves for its caller
fn ends_expression_recovery(kind: SyntaxKind) -> bool {
    kind.is_keyword()
        || matches!(
            kind,
            SyntaxKind::Semicolon
                | SyntaxKind::RParen
                | SyntaxKind::RBracket
                | SyntaxKind::RBrace
                | SyntaxKind::Comma
                | SyntaxKind::Colon
        )
}

#[cfg(test)]
mod tests {
    use crate::parse::parse_with_errors;
    use crate::syntax::{SyntaxKind, SyntaxNode};

    /// Parse `expr` as the value of a return statement and return the expression node
    fn parse_expr(expr: &str) -> SyntaxNode {
        let source = format!("function Bool f(); return {}; endfunction", expr);
        let (tree, errors) = parse_with_errors(&source);
        assert!(errors.is_empty(), "errors for {:?}: {:?}", expr, errors);
        let ret = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ReturnStmt)
            .unwrap();
        ret.children().next().unwrap()
    }

    /// Render the tree as a fully parenthesized string
    fn sexp(node: &SyntaxNode) -> String {
        let tokens = || {
            node.children_with_tokens()
                .filter_map(|e| e.into_token())
                .filter(|t| !t.kind().is_trivia())
        };
        let kids: Vec<_> = node.children().collect();
        match node.kind() {
            SyntaxKind::BinaryExpr => {
                let op = tokens().next().unwrap();
                format!("({} {} {})", op.text(), sexp(&kids[0]), sexp(&kids[1]))
            }
            SyntaxKind::UnaryExpr => {
                let op = tokens().next().unwrap();
                format!("({} {})", op.text(), sexp(&kids[0]))
            }
            SyntaxKind::ParenExpr => sexp(&kids[0]),
            _ => node.text().to_string().trim().to_string(),
        }
    }

    #[test]
    fn test_or_and_precedence() {
        assert_eq!(sexp(&parse_expr("a || b && c")), "(|| a (&& b c))");
    }

    #[test]
    fn test_additive_multiplicative() {
        assert_eq!(sexp(&parse_expr("a + b * c")), "(+ a (* b c))");
        assert_eq!(sexp(&parse_expr("a * b + c")), "(+ (* a b) c)");
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(sexp(&parse_expr("a - b - c")), "(- (- a b) c)");
        assert_eq!(sexp(&parse_expr("a << 1 << 2")), "(<< (<< a 1) 2)");
    }

    #[test]
    fn test_full_ladder() {
        assert_eq!(
            sexp(&parse_expr("a || b && c | d ^ e & f == g < h << i + j * k")),
            "(|| a (&& b (| c (^ d (& e (== f (< g (<< h (+ i (* j k))))))))))"
        );
    }

    #[test]
    fn test_unary_binds_tighter() {
        assert_eq!(sexp(&parse_expr("-a + b")), "(+ (- a) b)");
        assert_eq!(sexp(&parse_expr("!a && ~b")), "(&& (! a) (~ b))");
        assert_eq!(sexp(&parse_expr("&x | ^y")), "(| (& x) (^ y))");
    }

    #[test]
    fn test_parentheses_override() {
        assert_eq!(sexp(&parse_expr("(a + b) * c")), "(* (+ a b) c)");
    }

    #[test]
    fn test_comparison_le() {
        assert_eq!(sexp(&parse_expr("a <= b")), "(<= a b)");
    }

    #[test]
    fn test_postfix_forms() {
        assert_eq!(parse_expr("fifo.first").kind(), SyntaxKind::MemberExpr);
        assert_eq!(parse_expr("a.b.c").kind(), SyntaxKind::MemberExpr);
        assert_eq!(parse_expr("x[3]").kind(), SyntaxKind::BitSelectExpr);
        assert_eq!(parse_expr("x[7:4]").kind(), SyntaxKind::BitSelectExpr);
        assert_eq!(parse_expr("f(a, b + 1)").kind(), SyntaxKind::CallExpr);
        assert_eq!(parse_expr("f()").kind(), SyntaxKind::CallExpr);
        assert_eq!(parse_expr("m.read(x)").kind(), SyntaxKind::CallExpr);
        assert_eq!(parse_expr("{a, b[3:0], 4'h0}").kind(), SyntaxKind::BitConcatExpr);
    }

    #[test]
    fn test_literals() {
        for literal in ["42", "3.25", "8'hFF", "\"text\"", "True", "False"] {
            assert_eq!(parse_expr(literal).kind(), SyntaxKind::LiteralExpr);
        }
    }

    #[test]
    fn test_missing_operand() {
        let (tree, errors) = parse_with_errors("function Bool f(); return a + ; endfunction");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "expected expression");
        assert!(tree
            .descendants()
            .any(|n| n.kind() == SyntaxKind::BinaryExpr));
    }
}
