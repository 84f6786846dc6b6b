//! Type expressions: primitive, named and parameterized types

use super::ParseState;
use crate::syntax::SyntaxKind;

impl ParseState<'_> {
    /// Type := (PrimitiveType | NamedType) ( # ( TypeArg (, TypeArg)* ) )?
    pub(super) fn parse_type(&mut self) {
        if !self.at_type_start() {
            self.error("expected type");
            return;
        }
        if !self.enter() {
            return;
        }

        let checkpoint = self.checkpoint();
        let kind = if self.at(SyntaxKind::Ident) {
            SyntaxKind::NamedType
        } else {
            SyntaxKind::PrimitiveType
        };
        self.start_node(kind);
        self.bump();
        self.finish_node();

        if self.at(SyntaxKind::Hash) {
            self.start_node_at(checkpoint, SyntaxKind::ParameterizedType);
            self.bump();
            self.parse_type_arg_list();
            self.finish_node();
        }
        self.leave();
    }

    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TypeArgList);
        if !self.expect(SyntaxKind::LParen) {
            self.finish_node();
            return;
        }

        loop {
            self.parse_type_arg();
            if self.at(SyntaxKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }

        self.expect(SyntaxKind::RParen);
        self.finish_node();
    }

    /// Size arguments are expressions, everything else is a type
    fn parse_type_arg(&mut self) {
        match self.current_kind() {
            Some(kind) if kind.is_primitive_type() => self.parse_type(),
            Some(SyntaxKind::Ident)
                if matches!(
                    self.peek_kind(1),
                    Some(SyntaxKind::Hash | SyntaxKind::Comma | SyntaxKind::RParen)
                ) =>
            {
                self.parse_type()
            }
            Some(kind) if kind.starts_expr() => self.parse_expression(),
            _ => self.error("expected type or expression"),
        }
    }
}
