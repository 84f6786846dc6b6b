//! Typed views over the syntax tree
//!
//! Each wrapper holds a [`SyntaxNode`] of one kind and exposes its parts by
//! name (`name`, `return_type`, `condition`...). Accessors return `None` when
//! the part is missing, which only happens in trees with diagnostics. Trivia
//! is never returned by any accessor.

use crate::lexer::{parse_decimal, parse_sized_literal, split_sized_literal};
use crate::operators::{BinaryOp, UnaryOp};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxNodeExt, SyntaxToken};

/// A typed wrapper around a syntax node
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn children<N: AstNode>(node: &SyntaxNode) -> impl Iterator<Item = N> {
    node.children().filter_map(N::cast)
}

fn name_of(node: &SyntaxNode) -> Option<Name> {
    child(node)
}

fn end_label_of(node: &SyntaxNode) -> Option<String> {
    node.first_child_of_kind(SyntaxKind::EndLabel)?
        .first_token_of_kind(SyntaxKind::Ident)
        .map(|t| t.text().to_string())
}

fn identifiers(list: Option<SyntaxNode>) -> Vec<String> {
    list.map(|l| {
        l.significant_tokens()
            .into_iter()
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
            .collect()
    })
    .unwrap_or_default()
}

// === Names ===

ast_node!(
    /// The identifier naming a declaration
    Name => Name
);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        self.0.significant_tokens().into_iter().next()
    }

    pub fn text(&self) -> String {
        self.ident().map(|t| t.text().to_string()).unwrap_or_default()
    }
}

// === Declarations ===

ast_node!(SourceFile => SourceFile);
ast_node!(PackageDecl => PackageDecl);
ast_node!(ImportDecl => ImportDecl);
ast_node!(ModuleDecl => ModuleDecl);
ast_node!(
    /// Interface header and members of a module
    ModuleBody => ModuleBody
);
ast_node!(InterfaceDecl => InterfaceDecl);
ast_node!(TypedefDecl => TypedefDecl);
ast_node!(StructMember => StructMember);
ast_node!(FunctionDecl => FunctionDecl);
ast_node!(RuleDecl => RuleDecl);
ast_node!(MethodDecl => MethodDecl);
ast_node!(VariableDecl => VariableDecl);
ast_node!(ParameterList => ParameterList);
ast_node!(Parameter => Parameter);

/// A definition at package level
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Package(PackageDecl),
    Import(ImportDecl),
    Module(ModuleDecl),
    Interface(InterfaceDecl),
    Typedef(TypedefDecl),
    Function(FunctionDecl),
    Rule(RuleDecl),
    Method(MethodDecl),
}

impl AstNode for Item {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PackageDecl
                | SyntaxKind::ImportDecl
                | SyntaxKind::ModuleDecl
                | SyntaxKind::InterfaceDecl
                | SyntaxKind::TypedefDecl
                | SyntaxKind::FunctionDecl
                | SyntaxKind::RuleDecl
                | SyntaxKind::MethodDecl
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let item = match node.kind() {
            SyntaxKind::PackageDecl => Item::Package(PackageDecl(node)),
            SyntaxKind::ImportDecl => Item::Import(ImportDecl(node)),
            SyntaxKind::ModuleDecl => Item::Module(ModuleDecl(node)),
            SyntaxKind::InterfaceDecl => Item::Interface(InterfaceDecl(node)),
            SyntaxKind::TypedefDecl => Item::Typedef(TypedefDecl(node)),
            SyntaxKind::FunctionDecl => Item::Function(FunctionDecl(node)),
            SyntaxKind::RuleDecl => Item::Rule(RuleDecl(node)),
            SyntaxKind::MethodDecl => Item::Method(MethodDecl(node)),
            _ => return None,
        };
        Some(item)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Item::Package(it) => it.syntax(),
            Item::Import(it) => it.syntax(),
            Item::Module(it) => it.syntax(),
            Item::Interface(it) => it.syntax(),
            Item::Typedef(it) => it.syntax(),
            Item::Function(it) => it.syntax(),
            Item::Rule(it) => it.syntax(),
            Item::Method(it) => it.syntax(),
        }
    }
}

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = Item> {
        children(&self.0)
    }
}

impl PackageDecl {
    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    pub fn items(&self) -> impl Iterator<Item = Item> {
        children(&self.0)
    }

    pub fn end_label(&self) -> Option<String> {
        end_label_of(&self.0)
    }
}

impl ImportDecl {
    pub fn package_name(&self) -> Option<Name> {
        name_of(&self.0)
    }
}

impl ModuleDecl {
    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    pub fn is_exported(&self) -> bool {
        self.0.first_token_of_kind(SyntaxKind::ExportKw).is_some()
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<ModuleBody> {
        child(&self.0)
    }

    pub fn end_label(&self) -> Option<String> {
        end_label_of(&self.0)
    }
}

/// A member of a module body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleItem {
    Variable(VariableDecl),
    Rule(RuleDecl),
    Method(MethodDecl),
}

impl ModuleBody {
    /// The interface named in the `( ... )` header, if any
    pub fn interface_type(&self) -> Option<SyntaxToken> {
        self.0.first_token_of_kind(SyntaxKind::Ident)
    }

    pub fn items(&self) -> impl Iterator<Item = ModuleItem> {
        self.0.children().filter_map(|node| match node.kind() {
            SyntaxKind::VariableDecl => Some(ModuleItem::Variable(VariableDecl(node))),
            SyntaxKind::RuleDecl => Some(ModuleItem::Rule(RuleDecl(node))),
            SyntaxKind::MethodDecl => Some(ModuleItem::Method(MethodDecl(node))),
            _ => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = RuleDecl> {
        children(&self.0)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDecl> {
        children(&self.0)
    }
}

impl InterfaceDecl {
    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDecl> {
        children(&self.0)
    }

    pub fn end_label(&self) -> Option<String> {
        end_label_of(&self.0)
    }
}

/// The three typedef forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedefKind {
    Alias,
    Enum,
    Struct,
}

impl TypedefDecl {
    pub fn kind(&self) -> TypedefKind {
        if self.0.first_token_of_kind(SyntaxKind::EnumKw).is_some() {
            TypedefKind::Enum
        } else if self.0.first_token_of_kind(SyntaxKind::StructKw).is_some() {
            TypedefKind::Struct
        } else {
            TypedefKind::Alias
        }
    }

    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    /// Right-hand side of a type alias
    pub fn aliased_type(&self) -> Option<Type> {
        child(&self.0)
    }

    /// Enum variant names, in order
    pub fn variants(&self) -> Vec<String> {
        if self.kind() != TypedefKind::Enum {
            return Vec::new();
        }
        identifiers(self.0.first_child_of_kind(SyntaxKind::IdentifierList))
    }

    pub fn members(&self) -> impl Iterator<Item = StructMember> {
        children(&self.0)
    }

    /// Type classes named in `deriving (...)`
    pub fn deriving(&self) -> Vec<String> {
        identifiers(
            self.0
                .first_child_of_kind(SyntaxKind::DerivingClause)
                .and_then(|d| d.first_child_of_kind(SyntaxKind::IdentifierList)),
        )
    }
}

impl StructMember {
    pub fn ty(&self) -> Option<Type> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }
}

impl FunctionDecl {
    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    pub fn return_type(&self) -> Option<Type> {
        child(&self.0)
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    /// Local declarations and statements, in order
    pub fn body(&self) -> impl Iterator<Item = Stmt> {
        children(&self.0)
    }

    pub fn end_label(&self) -> Option<String> {
        end_label_of(&self.0)
    }
}

impl RuleDecl {
    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    pub fn guard(&self) -> Option<Expr> {
        self.0
            .first_child_of_kind(SyntaxKind::RuleGuard)
            .and_then(|g| child(&g))
    }

    pub fn body(&self) -> impl Iterator<Item = Stmt> {
        children(&self.0)
    }

    pub fn end_label(&self) -> Option<String> {
        end_label_of(&self.0)
    }
}

impl MethodDecl {
    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    pub fn return_type(&self) -> Option<Type> {
        child(&self.0)
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        child(&self.0)
    }

    /// Condition of the `if (...)` guard between signature and `;`
    pub fn guard(&self) -> Option<Expr> {
        self.0
            .first_child_of_kind(SyntaxKind::MethodGuard)
            .and_then(|g| child(&g))
    }

    /// Whether the method has an implementation closed by `endmethod`
    pub fn has_body(&self) -> bool {
        self.0.first_token_of_kind(SyntaxKind::EndmethodKw).is_some()
    }

    pub fn body(&self) -> impl Iterator<Item = Stmt> {
        children(&self.0)
    }

    pub fn end_label(&self) -> Option<String> {
        end_label_of(&self.0)
    }
}

impl VariableDecl {
    pub fn ty(&self) -> Option<Type> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }

    pub fn initializer(&self) -> Option<Expr> {
        child(&self.0)
    }

    /// `Type x <- expr;` binds the result of instantiating a module
    pub fn is_binding(&self) -> bool {
        self.0.first_token_of_kind(SyntaxKind::LeftArrow).is_some()
    }
}

impl ParameterList {
    pub fn params(&self) -> impl Iterator<Item = Parameter> {
        children(&self.0)
    }
}

impl Parameter {
    pub fn ty(&self) -> Option<Type> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<Name> {
        name_of(&self.0)
    }
}

// === Statements ===

ast_node!(AssignmentStmt => AssignmentStmt);
ast_node!(IfStmt => IfStmt);
ast_node!(CaseStmt => CaseStmt);
ast_node!(CaseArm => CaseArm);
ast_node!(CaseDefault => CaseDefault);
ast_node!(ReturnStmt => ReturnStmt);
ast_node!(ExprStmt => ExprStmt);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Assignment(AssignmentStmt),
    If(IfStmt),
    Case(CaseStmt),
    Return(ReturnStmt),
    Expr(ExprStmt),
    Variable(VariableDecl),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_stmt()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let stmt = match node.kind() {
            SyntaxKind::AssignmentStmt => Stmt::Assignment(AssignmentStmt(node)),
            SyntaxKind::IfStmt => Stmt::If(IfStmt(node)),
            SyntaxKind::CaseStmt => Stmt::Case(CaseStmt(node)),
            SyntaxKind::ReturnStmt => Stmt::Return(ReturnStmt(node)),
            SyntaxKind::ExprStmt => Stmt::Expr(ExprStmt(node)),
            SyntaxKind::VariableDecl => Stmt::Variable(VariableDecl(node)),
            _ => return None,
        };
        Some(stmt)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Stmt::Assignment(it) => it.syntax(),
            Stmt::If(it) => it.syntax(),
            Stmt::Case(it) => it.syntax(),
            Stmt::Return(it) => it.syntax(),
            Stmt::Expr(it) => it.syntax(),
            Stmt::Variable(it) => it.syntax(),
        }
    }
}

impl AssignmentStmt {
    /// The assigned identifier
    pub fn target(&self) -> Option<SyntaxToken> {
        self.0.first_token_of_kind(SyntaxKind::Ident)
    }

    fn index_exprs(&self) -> Vec<Expr> {
        self.0
            .first_child_of_kind(SyntaxKind::AssignIndex)
            .map(|index| children(&index).collect())
            .unwrap_or_default()
    }

    /// `e` in `x[e] <= ...` or `x[e:_] <= ...`
    pub fn index(&self) -> Option<Expr> {
        self.index_exprs().into_iter().next()
    }

    /// `e` in `x[_:e] <= ...`
    pub fn range_end(&self) -> Option<Expr> {
        self.index_exprs().into_iter().nth(1)
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl IfStmt {
    pub fn condition(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn then_branch(&self) -> Option<Stmt> {
        child(&self.0)
    }

    pub fn else_branch(&self) -> Option<Stmt> {
        self.0
            .first_child_of_kind(SyntaxKind::ElseBranch)
            .and_then(|e| child(&e))
    }
}

impl CaseStmt {
    pub fn subject(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn arms(&self) -> impl Iterator<Item = CaseArm> {
        children(&self.0)
    }

    pub fn default(&self) -> Option<CaseDefault> {
        child(&self.0)
    }

    pub fn end_label(&self) -> Option<String> {
        end_label_of(&self.0)
    }
}

impl CaseArm {
    pub fn pattern(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Stmt> {
        child(&self.0)
    }
}

impl CaseDefault {
    pub fn body(&self) -> Option<Stmt> {
        child(&self.0)
    }
}

impl ReturnStmt {
    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

// === Expressions ===

ast_node!(IdentExpr => IdentExpr);
ast_node!(LiteralExpr => LiteralExpr);
ast_node!(BinaryExpr => BinaryExpr);
ast_node!(UnaryExpr => UnaryExpr);
ast_node!(CallExpr => CallExpr);
ast_node!(MemberExpr => MemberExpr);
ast_node!(ParenExpr => ParenExpr);
ast_node!(BitSelectExpr => BitSelectExpr);
ast_node!(BitConcatExpr => BitConcatExpr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Ident(IdentExpr),
    Literal(LiteralExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Member(MemberExpr),
    Paren(ParenExpr),
    BitSelect(BitSelectExpr),
    BitConcat(BitConcatExpr),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_expr()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let expr = match node.kind() {
            SyntaxKind::IdentExpr => Expr::Ident(IdentExpr(node)),
            SyntaxKind::LiteralExpr => Expr::Literal(LiteralExpr(node)),
            SyntaxKind::BinaryExpr => Expr::Binary(BinaryExpr(node)),
            SyntaxKind::UnaryExpr => Expr::Unary(UnaryExpr(node)),
            SyntaxKind::CallExpr => Expr::Call(CallExpr(node)),
            SyntaxKind::MemberExpr => Expr::Member(MemberExpr(node)),
            SyntaxKind::ParenExpr => Expr::Paren(ParenExpr(node)),
            SyntaxKind::BitSelectExpr => Expr::BitSelect(BitSelectExpr(node)),
            SyntaxKind::BitConcatExpr => Expr::BitConcat(BitConcatExpr(node)),
            _ => return None,
        };
        Some(expr)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Ident(it) => it.syntax(),
            Expr::Literal(it) => it.syntax(),
            Expr::Binary(it) => it.syntax(),
            Expr::Unary(it) => it.syntax(),
            Expr::Call(it) => it.syntax(),
            Expr::Member(it) => it.syntax(),
            Expr::Paren(it) => it.syntax(),
            Expr::BitSelect(it) => it.syntax(),
            Expr::BitConcat(it) => it.syntax(),
        }
    }
}

impl IdentExpr {
    pub fn name(&self) -> String {
        self.0
            .first_token_of_kind(SyntaxKind::Ident)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

/// Decoded value of a literal token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Real,
    /// `8'hFF` is width 8, base 'h', digits "FF"
    Sized {
        width: u32,
        base: char,
        digits: String,
    },
    /// Contents without the quotes
    String(String),
    Bool(bool),
}

impl LiteralExpr {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0.significant_tokens().into_iter().next()
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        let token = self.token()?;
        let text = token.text();
        let kind = match token.kind() {
            SyntaxKind::IntLiteral => LiteralKind::Int,
            SyntaxKind::RealLiteral => LiteralKind::Real,
            SyntaxKind::SizedLiteral => {
                let (width, base, digits) = split_sized_literal(text)?;
                LiteralKind::Sized {
                    width,
                    base,
                    digits: digits.to_string(),
                }
            }
            SyntaxKind::StringLiteral => {
                let inner = text.strip_prefix('"').unwrap_or(text);
                LiteralKind::String(inner.strip_suffix('"').unwrap_or(inner).to_string())
            }
            SyntaxKind::TrueKw => LiteralKind::Bool(true),
            SyntaxKind::FalseKw => LiteralKind::Bool(false),
            _ => return None,
        };
        Some(kind)
    }

    /// Numeric value of an integer or sized literal
    pub fn int_value(&self) -> Option<u64> {
        let token = self.token()?;
        match token.kind() {
            SyntaxKind::IntLiteral => parse_decimal(token.text()),
            SyntaxKind::SizedLiteral => parse_sized_literal(token.text()),
            _ => None,
        }
    }
}

impl BinaryExpr {
    pub fn op_token(&self) -> Option<SyntaxToken> {
        self.0
            .significant_tokens()
            .into_iter()
            .find(|t| BinaryOp::from_kind(t.kind()).is_some())
    }

    pub fn op(&self) -> Option<BinaryOp> {
        self.op_token().and_then(|t| BinaryOp::from_kind(t.kind()))
    }

    pub fn lhs(&self) -> Option<Expr> {
        children(&self.0).next()
    }

    pub fn rhs(&self) -> Option<Expr> {
        children(&self.0).nth(1)
    }
}

impl UnaryExpr {
    pub fn op(&self) -> Option<UnaryOp> {
        self.0
            .significant_tokens()
            .into_iter()
            .find_map(|t| UnaryOp::from_kind(t.kind()))
    }

    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl CallExpr {
    pub fn callee(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn args(&self) -> Vec<Expr> {
        self.0
            .first_child_of_kind(SyntaxKind::ArgumentList)
            .map(|args| children(&args).collect())
            .unwrap_or_default()
    }
}

impl MemberExpr {
    pub fn base(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn field(&self) -> Option<SyntaxToken> {
        self.0.first_token_of_kind(SyntaxKind::Ident)
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl BitSelectExpr {
    pub fn base(&self) -> Option<Expr> {
        children(&self.0).next()
    }

    pub fn index(&self) -> Option<Expr> {
        children(&self.0).nth(1)
    }

    /// Present for an inclusive range select `x[hi:lo]`
    pub fn range_end(&self) -> Option<Expr> {
        children(&self.0).nth(2)
    }
}

impl BitConcatExpr {
    pub fn operands(&self) -> impl Iterator<Item = Expr> {
        children(&self.0)
    }
}

// === Types ===

ast_node!(PrimitiveType => PrimitiveType);
ast_node!(NamedType => NamedType);
ast_node!(ParameterizedType => ParameterizedType);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveType),
    Named(NamedType),
    Parameterized(ParameterizedType),
}

impl AstNode for Type {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_type()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let ty = match node.kind() {
            SyntaxKind::PrimitiveType => Type::Primitive(PrimitiveType(node)),
            SyntaxKind::NamedType => Type::Named(NamedType(node)),
            SyntaxKind::ParameterizedType => Type::Parameterized(ParameterizedType(node)),
            _ => return None,
        };
        Some(ty)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Type::Primitive(it) => it.syntax(),
            Type::Named(it) => it.syntax(),
            Type::Parameterized(it) => it.syntax(),
        }
    }
}

impl Type {
    /// Name of the base type, without arguments
    pub fn name(&self) -> String {
        match self {
            Type::Primitive(it) => it.name(),
            Type::Named(it) => it.name(),
            Type::Parameterized(it) => it.base().map(|b| b.name()).unwrap_or_default(),
        }
    }
}

impl PrimitiveType {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0.significant_tokens().into_iter().next()
    }

    pub fn name(&self) -> String {
        self.keyword().map(|t| t.text().to_string()).unwrap_or_default()
    }
}

impl NamedType {
    pub fn name(&self) -> String {
        self.0
            .first_token_of_kind(SyntaxKind::Ident)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

/// An argument of `T#(...)`: a type or a size expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Type(Type),
    Expr(Expr),
}

impl ParameterizedType {
    pub fn base(&self) -> Option<Type> {
        child(&self.0)
    }

    pub fn args(&self) -> Vec<TypeArg> {
        let Some(list) = self.0.first_child_of_kind(SyntaxKind::TypeArgList) else {
            return Vec::new();
        };
        list.children()
            .filter_map(|node| {
                if Type::can_cast(node.kind()) {
                    Type::cast(node).map(TypeArg::Type)
                } else {
                    Expr::cast(node).map(TypeArg::Expr)
                }
            })
            .collect()
    }

    /// Size and element type of `Vector#(size, element)`
    pub fn as_vector(&self) -> Option<(TypeArg, TypeArg)> {
        let base = self.base()?;
        let is_vector = matches!(&base, Type::Primitive(p)
            if p.keyword().is_some_and(|k| k.kind() == SyntaxKind::VectorKw));
        if !is_vector {
            return None;
        }
        let mut args = self.args().into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some(size), Some(element), None) => Some((size, element)),
            _ => None,
        }
    }
}
