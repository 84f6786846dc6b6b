//! Declarations: packages, imports, modules, interfaces, typedefs,
//! functions, rules, methods and variables

use super::ParseState;
use crate::syntax::SyntaxKind;

/// Where package-level recovery may stop skipping
fn definition_boundary(kind: SyntaxKind) -> bool {
    kind.is_definition_start() || kind.is_member_start() || kind == SyntaxKind::EndpackageKw
}

/// Where recovery inside module and interface bodies may stop skipping
fn member_boundary(kind: SyntaxKind) -> bool {
    kind.is_block_closer() || kind.is_definition_start() || kind.is_member_start()
}

impl ParseState<'_> {
    /// Parse one package-level definition. Rules and methods are accepted
    /// here too so that a lone member can be parsed as a fragment.
    pub(super) fn parse_definition(&mut self) {
        match self.current_kind() {
            Some(SyntaxKind::PackageKw) => self.parse_package_decl(),
            Some(SyntaxKind::ImportKw) => self.parse_import_decl(),
            Some(SyntaxKind::ModuleKw) => self.parse_module_decl(),
            Some(SyntaxKind::ExportKw) => {
                if self.peek_kind(1) == Some(SyntaxKind::ModuleKw) {
                    self.parse_module_decl()
                } else {
                    self.error_and_bump("expected 'module' after 'export'")
                }
            }
            Some(SyntaxKind::InterfaceKw) => self.parse_interface_decl(),
            Some(SyntaxKind::TypedefKw) => self.parse_typedef_decl(),
            Some(SyntaxKind::FunctionKw) => self.parse_function_decl(),
            Some(SyntaxKind::RuleKw) => self.parse_rule_decl(),
            Some(SyntaxKind::MethodKw) => self.parse_method_decl(),
            _ => self.recover(
                "expected package, import, module, interface, typedef or function",
                definition_boundary,
                false,
            ),
        }
    }

    /// package Name ; definition* endpackage (: Name)?
    fn parse_package_decl(&mut self) {
        self.start_node(SyntaxKind::PackageDecl);
        self.bump();
        self.expect_name("package");
        self.expect(SyntaxKind::Semicolon);
        self.open_block(SyntaxKind::EndpackageKw, "package");

        while !self.is_at_end() && !self.at(SyntaxKind::EndpackageKw) {
            self.parse_definition();
        }

        self.expect_closer(SyntaxKind::EndpackageKw);
        self.finish_node();
    }

    /// import Name :: * ;
    fn parse_import_decl(&mut self) {
        self.start_node(SyntaxKind::ImportDecl);
        self.bump();
        // Library packages are often named after their type (FIFO, Vector)
        if self.current_kind().is_some_and(|k| k.is_primitive_type()) {
            self.start_node(SyntaxKind::Name);
            self.bump();
            self.finish_node();
        } else {
            self.expect_name("package");
        }
        self.expect(SyntaxKind::ColonColon);
        self.expect(SyntaxKind::Star);
        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }

    /// export? module Name ParameterList? ModuleBody endmodule (: Name)?
    fn parse_module_decl(&mut self) {
        self.start_node(SyntaxKind::ModuleDecl);

        if self.at(SyntaxKind::ExportKw) {
            self.bump();
        }
        self.expect(SyntaxKind::ModuleKw);
        self.expect_name("module");

        if self.at(SyntaxKind::LParen) && self.at_module_parameter_list() {
            self.parse_parameter_list();
        }

        self.open_block(SyntaxKind::EndmoduleKw, "module");
        self.parse_module_body();
        self.expect_closer(SyntaxKind::EndmoduleKw);

        self.finish_node();
    }

    /// ( InterfaceType? ) ; { VariableDecl | RuleDecl | MethodDecl }*
    fn parse_module_body(&mut self) {
        self.start_node(SyntaxKind::ModuleBody);

        self.expect_in(SyntaxKind::LParen, "to open the module interface");
        if self.at(SyntaxKind::Ident) {
            self.bump();
        }
        self.expect(SyntaxKind::RParen);
        self.expect(SyntaxKind::Semicolon);

        while let Some(kind) = self.current_kind() {
            if kind.is_block_closer() || kind.is_definition_start() {
                break;
            }
            match kind {
                SyntaxKind::RuleKw => self.parse_rule_decl(),
                SyntaxKind::MethodKw => self.parse_method_decl(),
                _ if self.at_variable_decl() => self.parse_variable_decl(),
                _ => self.recover(
                    "expected a rule, method or variable declaration",
                    member_boundary,
                    true,
                ),
            }
        }

        self.finish_node();
    }

    /// interface Name ParameterList? ; MethodDecl* endinterface (: Name)?
    fn parse_interface_decl(&mut self) {
        self.start_node(SyntaxKind::InterfaceDecl);
        self.bump();
        self.expect_name("interface");

        if self.at(SyntaxKind::LParen) {
            self.parse_parameter_list();
        }
        self.expect(SyntaxKind::Semicolon);
        self.open_block(SyntaxKind::EndinterfaceKw, "interface");

        while let Some(kind) = self.current_kind() {
            if kind.is_block_closer() || kind.is_definition_start() {
                break;
            }
            if kind == SyntaxKind::MethodKw {
                self.parse_method_decl();
            } else {
                self.recover("expected method declaration", member_boundary, true);
            }
        }

        self.expect_closer(SyntaxKind::EndinterfaceKw);
        self.finish_node();
    }

    /// typedef Type Name ;
    /// typedef enum { a, b } Name deriving(...)? ;
    /// typedef struct { Type field; ... } Name deriving(...)? ;
    fn parse_typedef_decl(&mut self) {
        self.start_node(SyntaxKind::TypedefDecl);
        self.bump();

        match self.current_kind() {
            Some(SyntaxKind::EnumKw) => {
                self.bump();
                self.expect(SyntaxKind::LBrace);
                self.parse_identifier_list();
                self.expect(SyntaxKind::RBrace);
                self.expect_name("type");
                self.parse_deriving_clause();
            }
            Some(SyntaxKind::StructKw) => {
                self.bump();
                self.expect(SyntaxKind::LBrace);
                self.parse_struct_members();
                self.expect(SyntaxKind::RBrace);
                self.expect_name("type");
                self.parse_deriving_clause();
            }
            _ => {
                self.parse_type();
                self.expect_name("type");
            }
        }

        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn parse_struct_members(&mut self) {
        while let Some(kind) = self.current_kind() {
            if kind == SyntaxKind::RBrace || (kind.is_keyword() && !kind.is_primitive_type()) {
                break;
            }
            if self.at_type_start() {
                self.start_node(SyntaxKind::StructMember);
                self.parse_type();
                self.expect_name("field");
                self.expect(SyntaxKind::Semicolon);
                self.finish_node();
            } else {
                self.error_and_bump("expected struct member");
            }
        }
    }

    /// Identifier (, Identifier)*
    fn parse_identifier_list(&mut self) {
        self.start_node(SyntaxKind::IdentifierList);
        loop {
            if !self.expect(SyntaxKind::Ident) {
                break;
            }
            if self.at(SyntaxKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.finish_node();
    }

    /// deriving ( Class, ... )
    fn parse_deriving_clause(&mut self) {
        if !self.at(SyntaxKind::DerivingKw) {
            return;
        }
        self.start_node(SyntaxKind::DerivingClause);
        self.bump();
        self.expect(SyntaxKind::LParen);
        self.parse_identifier_list();
        self.expect(SyntaxKind::RParen);
        self.finish_node();
    }

    /// function Type Name ParameterList ; body endfunction (: Name)?
    fn parse_function_decl(&mut self) {
        self.start_node(SyntaxKind::FunctionDecl);
        self.bump();

        self.parse_type();
        self.expect_name("function");
        if self.at(SyntaxKind::LParen) {
            self.parse_parameter_list();
        } else {
            self.error("expected parameter list");
        }
        self.expect(SyntaxKind::Semicolon);

        self.open_block(SyntaxKind::EndfunctionKw, "function");
        self.parse_block_body();
        self.expect_closer(SyntaxKind::EndfunctionKw);

        self.finish_node();
    }

    /// rule Name ( ( condition ) )? ; Statement* endrule (: Name)?
    pub(super) fn parse_rule_decl(&mut self) {
        self.start_node(SyntaxKind::RuleDecl);
        self.bump();
        self.expect_name("rule");

        if self.at(SyntaxKind::LParen) {
            self.start_node(SyntaxKind::RuleGuard);
            self.bump();
            self.parse_expression();
            self.expect(SyntaxKind::RParen);
            self.finish_node();
        }
        self.expect(SyntaxKind::Semicolon);

        self.open_block(SyntaxKind::EndruleKw, "rule");
        self.parse_block_body();
        self.expect_closer(SyntaxKind::EndruleKw);

        self.finish_node();
    }

    /// method Type? Name ParameterList? (if ( guard ))? ;
    ///     [ Statement* endmethod (: Name)? ;? ]
    pub(super) fn parse_method_decl(&mut self) {
        self.start_node(SyntaxKind::MethodDecl);
        self.bump();

        if self.at_method_return_type() {
            self.parse_type();
        }
        self.expect_name("method");

        if self.at(SyntaxKind::LParen) {
            self.parse_parameter_list();
        }

        if self.at(SyntaxKind::IfKw) {
            self.start_node(SyntaxKind::MethodGuard);
            self.bump();
            self.expect(SyntaxKind::LParen);
            self.parse_expression();
            self.expect(SyntaxKind::RParen);
            self.finish_node();
        }

        self.expect_in(SyntaxKind::Semicolon, "after method signature");

        if self.method_has_body() {
            self.open_block(SyntaxKind::EndmethodKw, "method");
            self.parse_block_body();
            self.expect_closer(SyntaxKind::EndmethodKw);
            if self.at(SyntaxKind::Semicolon) {
                self.bump();
            }
        }

        self.finish_node();
    }

    /// Type Name ( (= | <-) expression )? ;
    pub(super) fn parse_variable_decl(&mut self) {
        self.start_node(SyntaxKind::VariableDecl);
        self.parse_type();
        self.expect_name("variable");

        if self.at(SyntaxKind::Assign) || self.at(SyntaxKind::LeftArrow) {
            self.bump();
            self.parse_expression();
        }

        self.expect_in(SyntaxKind::Semicolon, "after variable declaration");
        self.finish_node();
    }

    /// ( (Type Name (, Type Name)*)? )
    pub(super) fn parse_parameter_list(&mut self) {
        self.start_node(SyntaxKind::ParameterList);
        self.bump();

        if !self.at(SyntaxKind::RParen) {
            loop {
                if !self.at_type_start() {
                    self.error("expected parameter");
                    break;
                }
                self.start_node(SyntaxKind::Parameter);
                self.parse_type();
                self.expect_name("parameter");
                self.finish_node();

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

#[cfg(test)]
mod tests {
    use crate::parse::parse_with_errors;
    use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxNodeExt};

    fn parse_ok(source: &str) -> SyntaxNode {
        let (tree, errors) = parse_with_errors(source);
        assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
        tree
    }

    fn count(tree: &SyntaxNode, kind: SyntaxKind) -> usize {
        tree.descendants().filter(|n| n.kind() == kind).count()
    }

    #[test]
    fn test_package_with_definitions() {
        let tree = parse_ok(
            "package Counter;\n\
             import FIFO :: *;\n\
             typedef Bit#(8) Byte;\n\
             endpackage : Counter",
        );
        let package = tree.first_child_of_kind(SyntaxKind::PackageDecl).unwrap();
        assert!(package.first_child_of_kind(SyntaxKind::ImportDecl).is_some());
        assert!(package.first_child_of_kind(SyntaxKind::TypedefDecl).is_some());
        assert!(package.first_child_of_kind(SyntaxKind::EndLabel).is_some());
    }

    #[test]
    fn test_nested_package() {
        let tree = parse_ok("package A; package B; endpackage endpackage");
        assert_eq!(count(&tree, SyntaxKind::PackageDecl), 2);
    }

    #[test]
    fn test_module_with_parameters() {
        let tree = parse_ok("export module mkFoo(Bit#(8) init)(Counter); endmodule");
        let module = tree.first_child_of_kind(SyntaxKind::ModuleDecl).unwrap();
        assert!(module.first_token_of_kind(SyntaxKind::ExportKw).is_some());
        assert!(module.first_child_of_kind(SyntaxKind::ParameterList).is_some());
        let body = module.first_child_of_kind(SyntaxKind::ModuleBody).unwrap();
        assert!(body.first_token_of_kind(SyntaxKind::Ident).is_some());
    }

    #[test]
    fn test_module_members() {
        let tree = parse_ok(
            "module mkCounter(Counter);\n\
               Reg#(Bit#(8)) count <- mkReg(0);\n\
               Bool enabled = True;\n\
               rule tick (enabled);\n\
                 count <= count + 1;\n\
               endrule\n\
               method Bit#(8) read;\n\
                 return count;\n\
               endmethod\n\
               method Action reset();\n\
                 count <= 0;\n\
               endmethod : reset;\n\
             endmodule : mkCounter",
        );
        assert_eq!(count(&tree, SyntaxKind::VariableDecl), 2);
        assert_eq!(count(&tree, SyntaxKind::RuleGuard), 1);
        assert_eq!(count(&tree, SyntaxKind::MethodDecl), 2);
        assert_eq!(count(&tree, SyntaxKind::ReturnStmt), 1);
    }

    #[test]
    fn test_interface_methods() {
        let tree = parse_ok(
            "interface Counter;\n\
               method Bit#(8) read;\n\
               method Action load(Bit#(8) value);\n\
               method Bool ready;\n\
             endinterface",
        );
        let iface = tree.first_child_of_kind(SyntaxKind::InterfaceDecl).unwrap();
        let methods = iface.children_of_kind(SyntaxKind::MethodDecl);
        assert_eq!(methods.len(), 3);
        for method in methods {
            assert!(method.first_token_of_kind(SyntaxKind::EndmethodKw).is_none());
        }
    }

    #[test]
    fn test_typedef_forms() {
        let tree = parse_ok(
            "typedef UInt#(16) Addr;\n\
             typedef enum { Idle, Busy, Done } State deriving (Bits, Eq);\n\
             typedef struct { Addr addr; Bit#(32) data; } Req deriving (Bits);\n\
             typedef Vector#(4, Bit#(8)) Word;",
        );
        assert_eq!(count(&tree, SyntaxKind::TypedefDecl), 4);
        assert_eq!(count(&tree, SyntaxKind::StructMember), 2);
        assert_eq!(count(&tree, SyntaxKind::DerivingClause), 2);
        assert_eq!(count(&tree, SyntaxKind::IdentifierList), 3);
    }

    #[test]
    fn test_function_with_locals() {
        let tree = parse_ok(
            "function Bit#(8) add(Bit#(8) a, Bit#(8) b);\n\
               Bit#(8) sum = a + b;\n\
               return sum;\n\
             endfunction : add",
        );
        let function = tree.first_child_of_kind(SyntaxKind::FunctionDecl).unwrap();
        let params = function.first_child_of_kind(SyntaxKind::ParameterList).unwrap();
        assert_eq!(params.children_of_kind(SyntaxKind::Parameter).len(), 2);
        assert!(function.first_child_of_kind(SyntaxKind::VariableDecl).is_some());
    }

    #[test]
    fn test_member_fragments() {
        let tree = parse_ok("method Bool isReady; rule r; x <= 1; endrule");
        assert!(tree.first_child_of_kind(SyntaxKind::MethodDecl).is_some());
        assert!(tree.first_child_of_kind(SyntaxKind::RuleDecl).is_some());
    }

    #[test]
    fn test_export_without_module() {
        let (tree, errors) = parse_with_errors("export foo; module mkA(); endmodule");
        assert!(!errors.is_empty());
        assert!(tree.first_child_of_kind(SyntaxKind::ModuleDecl).is_some());
    }
}
