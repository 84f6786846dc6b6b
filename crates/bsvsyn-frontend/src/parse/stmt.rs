//! Statements: assignment, if, case, return and expression statements

use super::ParseState;
use crate::syntax::SyntaxKind;

/// Tokens at which statement-level recovery stops skipping
fn statement_boundary(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Ident | SyntaxKind::IfKw | SyntaxKind::CaseKw | SyntaxKind::ReturnKw
    ) || kind.is_block_closer()
        || kind.is_definition_start()
        || kind.is_member_start()
}

fn case_item_boundary(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::DefaultKw || kind.starts_expr() || statement_boundary(kind)
}

impl ParseState<'_> {
    /// Body of a function, rule or method: variable declarations and
    /// statements up to the next block closer or declaration keyword
    pub(super) fn parse_block_body(&mut self) {
        while !self.is_at_end() && !self.at_block_boundary() {
            let before = self.current;
            if self.at_variable_decl() {
                self.parse_variable_decl();
            } else {
                self.parse_statement();
            }
            if self.current == before {
                self.error_and_bump("expected statement");
            }
        }
    }

    /// Parse a single statement
    pub(super) fn parse_statement(&mut self) {
        if !self.enter() {
            return;
        }

        match self.current_kind() {
            Some(SyntaxKind::IfKw) => self.parse_if_stmt(),
            Some(SyntaxKind::CaseKw) => self.parse_case_stmt(),
            Some(SyntaxKind::ReturnKw) => self.parse_return_stmt(),
            Some(SyntaxKind::Ident) if self.at_assignment() => self.parse_assignment_stmt(),
            Some(kind) if kind.starts_expr() => self.parse_expr_stmt(),
            _ => {
                if self.is_at_end() || self.at_block_boundary() {
                    // Leave the closer for the enclosing block
                    self.error("expected statement");
                } else {
                    self.recover("expected statement", statement_boundary, true);
                }
            }
        }

        self.leave();
    }

    /// target ([ index (: end)? ])? <= value ;
    fn parse_assignment_stmt(&mut self) {
        self.start_node(SyntaxKind::AssignmentStmt);
        self.bump();

        if self.at(SyntaxKind::LBracket) {
            self.start_node(SyntaxKind::AssignIndex);
            self.bump();
            self.parse_expression();
            if self.at(SyntaxKind::Colon) {
                self.bump();
                self.parse_expression();
            }
            self.expect(SyntaxKind::RBracket);
            self.finish_node();
        }

        self.expect_in(SyntaxKind::Le, "in assignment");
        self.parse_expression();
        self.expect_in(SyntaxKind::Semicolon, "after assignment");

        self.finish_node();
    }

    /// if ( condition ) statement (else statement)?
    ///
    /// A dangling `else` binds to the nearest `if`.
    fn parse_if_stmt(&mut self) {
        self.start_node(SyntaxKind::IfStmt);
        self.bump();

        self.expect(SyntaxKind::LParen);
        self.parse_expression();
        self.expect(SyntaxKind::RParen);
        self.parse_statement();

        if self.at(SyntaxKind::ElseKw) {
            self.start_node(SyntaxKind::ElseBranch);
            self.bump();
            self.parse_statement();
            self.finish_node();
        }

        self.finish_node();
    }

    /// case ( subject ) (pattern : statement)* (default : statement)? endcase
    fn parse_case_stmt(&mut self) {
        self.start_node(SyntaxKind::CaseStmt);
        self.bump();

        self.expect(SyntaxKind::LParen);
        self.parse_expression();
        self.expect(SyntaxKind::RParen);
        self.open_block(SyntaxKind::EndcaseKw, "case");

        while let Some(kind) = self.current_kind() {
            if kind.is_block_closer() || kind.is_definition_start() || kind.is_member_start() {
                break;
            }
            if kind == SyntaxKind::DefaultKw {
                self.start_node(SyntaxKind::CaseDefault);
                self.bump();
                self.expect(SyntaxKind::Colon);
                self.parse_statement();
                self.finish_node();
            } else if kind.starts_expr() {
                self.start_node(SyntaxKind::CaseArm);
                self.parse_expression();
                self.expect(SyntaxKind::Colon);
                self.parse_statement();
                self.finish_node();
            } else {
                self.recover("expected case item", case_item_boundary, true);
            }
        }

        self.expect_closer(SyntaxKind::EndcaseKw);
        self.finish_node();
    }

    /// return expression ;
    fn parse_return_stmt(&mut self) {
        self.start_node(SyntaxKind::ReturnStmt);
        self.bump();
        self.parse_expression();
        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }

    /// expression ;
    fn parse_expr_stmt(&mut self) {
        self.start_node(SyntaxKind::ExprStmt);
        self.parse_expression();
        self.expect_in(SyntaxKind::Semicolon, "after expression");
        self.finish_node();
    }
}
