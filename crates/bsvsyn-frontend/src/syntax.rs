//! Syntax tree definitions for BSV using Rowan
//!
//! This module defines the syntax kinds and tree structure for the BSV language

use crate::lexer::Token;

/// Syntax kinds for BSV language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // === Tokens (Terminal nodes) ===

    // Declaration keywords
    PackageKw,
    EndpackageKw,
    ImportKw,
    ExportKw,
    ModuleKw,
    EndmoduleKw,
    InterfaceKw,
    EndinterfaceKw,
    TypedefKw,
    EnumKw,
    StructKw,
    DerivingKw,
    FunctionKw,
    EndfunctionKw,
    RuleKw,
    EndruleKw,
    MethodKw,
    EndmethodKw,

    // Statement keywords
    IfKw,
    ElseKw,
    CaseKw,
    EndcaseKw,
    DefaultKw,
    ReturnKw,
    TrueKw,
    FalseKw,

    // Primitive type keywords
    BitKw,
    IntKw,
    UIntKw,
    BoolKw,
    VoidKw,
    IntegerKw,
    StringKw,
    RegKw,
    WireKw,
    FifoKw,
    VectorKw,
    ActionKw,
    ActionValueKw,
    RulesKw,
    ModuleTypeKw,

    // Literals
    Ident,
    IntLiteral,
    RealLiteral,
    SizedLiteral,
    StringLiteral,

    // Operators
    PipePipe,   // ||
    AmpAmp,     // &&
    Pipe,       // |
    Caret,      // ^
    Amp,        // &
    Eq,         // ==
    Neq,        // !=
    Lt,         // <
    Le,         // <= (also non-blocking assignment)
    Gt,         // >
    Ge,         // >=
    Shl,        // <<
    Shr,        // >>
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    Bang,       // !
    Tilde,      // ~
    Assign,     // =
    LeftArrow,  // <-
    Hash,       // #

    // Delimiters
    LParen,     // (
    RParen,     // )
    LBracket,   // [
    RBracket,   // ]
    LBrace,     // {
    RBrace,     // }
    Comma,      // ,
    Semicolon,  // ;
    ColonColon, // ::
    Colon,      // :
    Dot,        // .

    // Trivia
    Whitespace,
    Comment,
    Attribute,

    // Error (lexical error token, or node wrapping skipped input)
    Error,

    // === Non-terminal nodes ===

    // Top level
    SourceFile,

    // Declarations
    PackageDecl,
    ImportDecl,
    ModuleDecl,
    ModuleBody,
    InterfaceDecl,
    TypedefDecl,
    StructMember,
    DerivingClause,
    FunctionDecl,
    RuleDecl,
    RuleGuard,
    MethodDecl,
    MethodGuard,
    VariableDecl,

    // Declaration parts
    Name,
    EndLabel,
    Parameter,
    ParameterList,
    ArgumentList,
    IdentifierList,

    // Statements
    AssignmentStmt,
    AssignIndex,
    IfStmt,
    ElseBranch,
    CaseStmt,
    CaseArm,
    CaseDefault,
    ReturnStmt,
    ExprStmt,

    // Expressions
    IdentExpr,
    LiteralExpr,
    BinaryExpr,
    UnaryExpr,
    CallExpr,
    MemberExpr,
    ParenExpr,
    BitSelectExpr,
    BitConcatExpr,

    // Types
    PrimitiveType,
    NamedType,
    ParameterizedType,
    TypeArgList,

    // Placeholder for the end
    #[doc(hidden)]
    __Last,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment or attribute)
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Comment | Attribute)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (PackageKw as u16) && (self as u16) <= (ModuleTypeKw as u16)
    }

    /// Primitive type names
    pub fn is_primitive_type(self) -> bool {
        (self as u16) >= (BitKw as u16) && (self as u16) <= (ModuleTypeKw as u16)
    }

    /// Keywords that close a block
    pub fn is_block_closer(self) -> bool {
        matches!(
            self,
            EndpackageKw
                | EndmoduleKw
                | EndinterfaceKw
                | EndfunctionKw
                | EndruleKw
                | EndmethodKw
                | EndcaseKw
        )
    }

    /// Keywords that start a definition allowed at package level
    pub fn is_definition_start(self) -> bool {
        matches!(
            self,
            PackageKw | ImportKw | ExportKw | ModuleKw | InterfaceKw | TypedefKw | FunctionKw
        )
    }

    /// Keywords that start a module or interface member
    pub fn is_member_start(self) -> bool {
        matches!(self, RuleKw | MethodKw)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            IntLiteral | RealLiteral | SizedLiteral | StringLiteral | TrueKw | FalseKw
        )
    }

    /// Tokens that can begin an expression
    pub fn starts_expr(self) -> bool {
        self.is_literal()
            || matches!(
                self,
                Ident | LParen | LBrace | Bang | Minus | Tilde | Amp | Pipe | Caret
            )
    }

    /// Check if this is an expression node
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            IdentExpr
                | LiteralExpr
                | BinaryExpr
                | UnaryExpr
                | CallExpr
                | MemberExpr
                | ParenExpr
                | BitSelectExpr
                | BitConcatExpr
        )
    }

    /// Check if this is a statement node
    pub fn is_stmt(self) -> bool {
        matches!(
            self,
            AssignmentStmt | IfStmt | CaseStmt | ReturnStmt | ExprStmt | VariableDecl
        )
    }

    /// Check if this is a type node
    pub fn is_type(self) -> bool {
        matches!(self, PrimitiveType | NamedType | ParameterizedType)
    }

    /// Get a human-readable description of this syntax kind
    pub fn description(self) -> &'static str {
        match self {
            PackageKw => "'package'",
            EndpackageKw => "'endpackage'",
            ImportKw => "'import'",
            ExportKw => "'export'",
            ModuleKw => "'module'",
            EndmoduleKw => "'endmodule'",
            InterfaceKw => "'interface'",
            EndinterfaceKw => "'endinterface'",
            TypedefKw => "'typedef'",
            EnumKw => "'enum'",
            StructKw => "'struct'",
            DerivingKw => "'deriving'",
            FunctionKw => "'function'",
            EndfunctionKw => "'endfunction'",
            RuleKw => "'rule'",
            EndruleKw => "'endrule'",
            MethodKw => "'method'",
            EndmethodKw => "'endmethod'",
            IfKw => "'if'",
            ElseKw => "'else'",
            CaseKw => "'case'",
            EndcaseKw => "'endcase'",
            DefaultKw => "'default'",
            ReturnKw => "'return'",
            TrueKw => "'True'",
            FalseKw => "'False'",

            BitKw => "'Bit'",
            IntKw => "'Int'",
            UIntKw => "'UInt'",
            BoolKw => "'Bool'",
            VoidKw => "'void'",
            IntegerKw => "'Integer'",
            StringKw => "'String'",
            RegKw => "'Reg'",
            WireKw => "'Wire'",
            FifoKw => "'FIFO'",
            VectorKw => "'Vector'",
            ActionKw => "'Action'",
            ActionValueKw => "'ActionValue'",
            RulesKw => "'Rules'",
            ModuleTypeKw => "'Module'",

            Ident => "identifier",
            IntLiteral => "integer literal",
            RealLiteral => "real literal",
            SizedLiteral => "sized literal",
            StringLiteral => "string literal",

            PipePipe => "'||'",
            AmpAmp => "'&&'",
            Pipe => "'|'",
            Caret => "'^'",
            Amp => "'&'",
            Eq => "'=='",
            Neq => "'!='",
            Lt => "'<'",
            Le => "'<='",
            Gt => "'>'",
            Ge => "'>='",
            Shl => "'<<'",
            Shr => "'>>'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Bang => "'!'",
            Tilde => "'~'",
            Assign => "'='",
            LeftArrow => "'<-'",
            Hash => "'#'",

            LParen => "'('",
            RParen => "')'",
            LBracket => "'['",
            RBracket => "']'",
            LBrace => "'{'",
            RBrace => "'}'",
            Comma => "','",
            Semicolon => "';'",
            ColonColon => "'::'",
            Colon => "':'",
            Dot => "'.'",

            Whitespace => "whitespace",
            Comment => "comment",
            Attribute => "attribute",
            Error => "error",

            SourceFile => "source file",
            PackageDecl => "package declaration",
            ImportDecl => "import declaration",
            ModuleDecl => "module declaration",
            ModuleBody => "module body",
            InterfaceDecl => "interface declaration",
            TypedefDecl => "typedef",
            FunctionDecl => "function declaration",
            RuleDecl => "rule declaration",
            MethodDecl => "method declaration",
            VariableDecl => "variable declaration",
            CaseStmt => "case statement",

            _ => "unknown",
        }
    }
}

/// Convert our lexer tokens to syntax kinds
impl From<Token> for SyntaxKind {
    fn from(token: Token) -> Self {
        match token {
            Token::Package => PackageKw,
            Token::EndPackage => EndpackageKw,
            Token::Import => ImportKw,
            Token::Export => ExportKw,
            Token::Module => ModuleKw,
            Token::EndModule => EndmoduleKw,
            Token::Interface => InterfaceKw,
            Token::EndInterface => EndinterfaceKw,
            Token::Typedef => TypedefKw,
            Token::Enum => EnumKw,
            Token::Struct => StructKw,
            Token::Deriving => DerivingKw,
            Token::Function => FunctionKw,
            Token::EndFunction => EndfunctionKw,
            Token::Rule => RuleKw,
            Token::EndRule => EndruleKw,
            Token::Method => MethodKw,
            Token::EndMethod => EndmethodKw,

            Token::If => IfKw,
            Token::Else => ElseKw,
            Token::Case => CaseKw,
            Token::EndCase => EndcaseKw,
            Token::Default => DefaultKw,
            Token::Return => ReturnKw,
            Token::True => TrueKw,
            Token::False => FalseKw,

            Token::Bit => BitKw,
            Token::Int => IntKw,
            Token::UInt => UIntKw,
            Token::Bool => BoolKw,
            Token::Void => VoidKw,
            Token::Integer => IntegerKw,
            Token::String => StringKw,
            Token::Reg => RegKw,
            Token::Wire => WireKw,
            Token::Fifo => FifoKw,
            Token::Vector => VectorKw,
            Token::Action => ActionKw,
            Token::ActionValue => ActionValueKw,
            Token::Rules => RulesKw,
            Token::ModuleType => ModuleTypeKw,

            Token::Identifier => Ident,
            Token::IntLiteral => IntLiteral,
            Token::RealLiteral => RealLiteral,
            Token::SizedLiteral => SizedLiteral,
            Token::StringLiteral(_) => StringLiteral,

            Token::LogicalOr => PipePipe,
            Token::LogicalAnd => AmpAmp,
            Token::Pipe => Pipe,
            Token::Caret => Caret,
            Token::Ampersand => Amp,
            Token::Equal => Eq,
            Token::NotEqual => Neq,
            Token::Less => Lt,
            Token::LessEqual => Le,
            Token::Greater => Gt,
            Token::GreaterEqual => Ge,
            Token::LeftShift => Shl,
            Token::RightShift => Shr,
            Token::Plus => Plus,
            Token::Minus => Minus,
            Token::Star => Star,
            Token::Slash => Slash,
            Token::Percent => Percent,
            Token::Bang => Bang,
            Token::Tilde => Tilde,
            Token::Assign => Assign,
            Token::LeftArrow => LeftArrow,
            Token::Hash => Hash,

            Token::LeftParen => LParen,
            Token::RightParen => RParen,
            Token::LeftBracket => LBracket,
            Token::RightBracket => RBracket,
            Token::LeftBrace => LBrace,
            Token::RightBrace => RBrace,
            Token::Comma => Comma,
            Token::Semicolon => Semicolon,
            Token::ColonColon => ColonColon,
            Token::Colon => Colon,
            Token::Dot => Dot,

            Token::Whitespace => Whitespace,
            Token::LineComment | Token::BlockComment(_) => Comment,
            Token::Attribute(_) => Attribute,

            Token::Error => Error,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BsvLanguage {}

impl rowan::Language for BsvLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < (__Last as u16));
        // SAFETY: SyntaxKind is repr(u16) and every value below __Last is a variant
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<BsvLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<BsvLanguage>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<BsvLanguage>;

/// Extension methods for SyntaxNode
pub trait SyntaxNodeExt {
    /// Get the first child of a specific kind
    fn first_child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode>;

    /// Get all children of a specific kind
    fn children_of_kind(&self, kind: SyntaxKind) -> Vec<SyntaxNode>;

    /// Get the first token of a specific kind
    fn first_token_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxToken>;

    /// Non-trivia tokens directly under this node
    fn significant_tokens(&self) -> Vec<SyntaxToken>;
}

impl SyntaxNodeExt for SyntaxNode {
    fn first_child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.children().find(|n| n.kind() == kind)
    }

    fn children_of_kind(&self, kind: SyntaxKind) -> Vec<SyntaxNode> {
        self.children().filter(|n| n.kind() == kind).collect()
    }

    fn first_token_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == kind)
    }

    fn significant_tokens(&self) -> Vec<SyntaxToken> {
        self.children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect()
    }
}
