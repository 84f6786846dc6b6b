//! Error Recovery Test Suite
//!
//! Malformed input must still produce a complete tree, a bounded set of
//! diagnostics, and no hang or panic.

use bsvsyn_frontend::ast::{ModuleDecl, RuleDecl};
use bsvsyn_frontend::{parse, AstNode, Diagnostic, DiagnosticKind, SyntaxKind, SyntaxTree};
use std::time::{Duration, Instant};

fn parse_lossless(source: &str) -> (SyntaxTree, Vec<Diagnostic>) {
    let (tree, diagnostics) = parse(source);
    assert_eq!(tree.text(), source, "tree text differs from input");
    (tree, diagnostics)
}

fn count(tree: &SyntaxTree, kind: SyntaxKind) -> usize {
    tree.syntax().descendants().filter(|n| n.kind() == kind).count()
}

fn of_kind(diagnostics: &[Diagnostic], kind: DiagnosticKind) -> Vec<&Diagnostic> {
    diagnostics.iter().filter(|d| d.kind == kind).collect()
}

// =============================================================================
// SECTION 1: TERMINATION
// =============================================================================

#[test]
fn test_only_openers_terminates() {
    let source = "package module interface rule method function case if ( [ { ".repeat(50);
    let (_, diagnostics) = parse_lossless(&source);
    assert!(!diagnostics.is_empty());
    assert_eq!(of_kind(&diagnostics, DiagnosticKind::UnexpectedEof).len(), 1);
}

#[test]
fn test_only_closers_terminates() {
    let source = "endmodule endrule endmethod endcase endpackage ) ] } ; ".repeat(50);
    let (tree, diagnostics) = parse_lossless(&source);
    assert!(!diagnostics.is_empty());
    assert!(count(&tree, SyntaxKind::Error) > 0);
}

#[test]
fn test_punctuation_soup_terminates() {
    let (_, diagnostics) = parse_lossless(":: <= <- # . , : ? ; ( ) == != && || ~ ^ ");
    assert!(!diagnostics.is_empty());
}

#[test]
fn test_deep_parentheses_hit_limit() {
    let source = format!("function Bool f(); return {}a; endfunction", "(".repeat(10_000));
    let (_, diagnostics) = parse_lossless(&source);
    assert!(diagnostics
        .iter()
        .any(|d| d.message.contains("nesting exceeds the limit")));
}

#[test]
fn test_deep_type_nesting_hits_limit() {
    let source = format!("typedef {}8{} T;", "Bit#(".repeat(20_000), ")".repeat(20_000));
    let (tree, diagnostics) = parse_lossless(&source);
    assert!(diagnostics
        .iter()
        .any(|d| d.message.contains("nesting exceeds the limit")));
    assert_eq!(count(&tree, SyntaxKind::TypedefDecl), 1);

    // Same for a declaration inside a module body
    let source = format!(
        "module mkM(); {}8{} r <- mkReg(0); endmodule",
        "Reg#(".repeat(20_000),
        ")".repeat(20_000)
    );
    let (tree, diagnostics) = parse_lossless(&source);
    assert!(diagnostics
        .iter()
        .any(|d| d.message.contains("nesting exceeds the limit")));
    assert_eq!(count(&tree, SyntaxKind::ModuleDecl), 1);
}

#[test]
fn test_unclosed_index_targets_parse_in_linear_time() {
    // Every statement starts with `x[` and nothing ever closes it
    let body = "x[y ".repeat(40_000);
    let source = format!("function Bool f(); {}", body);

    let start = Instant::now();
    let (tree, diagnostics) = parse_lossless(&source);
    let elapsed = start.elapsed();

    assert!(!diagnostics.is_empty());
    assert_eq!(count(&tree, SyntaxKind::AssignmentStmt), 0);
    assert!(
        elapsed < Duration::from_secs(5),
        "parsing took {:?}",
        elapsed
    );
}

#[test]
fn test_deep_if_chain_hits_limit() {
    let source = format!(
        "module mkM(); rule r; {}x <= 1; endrule endmodule",
        "if (c) ".repeat(5_000)
    );
    let (tree, diagnostics) = parse_lossless(&source);
    assert!(!diagnostics.is_empty());
    assert_eq!(count(&tree, SyntaxKind::RuleDecl), 1);
}

// =============================================================================
// SECTION 2: END OF INPUT
// =============================================================================

#[test]
fn test_single_eof_diagnostic_lists_open_blocks() {
    let (_, diagnostics) = parse_lossless("package P; module mkM(); rule r; x <= 1;");
    assert_eq!(diagnostics.len(), 1);

    let eof = &diagnostics[0];
    assert_eq!(eof.kind, DiagnosticKind::UnexpectedEof);
    assert!(eof.message.contains("endrule"));
    assert!(eof.message.contains("endmodule"));
    assert!(eof.message.contains("endpackage"));
    // Innermost construct first
    assert!(eof.message.find("endrule") < eof.message.find("endpackage"));
}

#[test]
fn test_eof_mid_expression() {
    let (tree, diagnostics) = parse_lossless("module mkM(); rule r; x <= a + ");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span.start, tree.text().len());
    assert_eq!(diagnostics[0].found.as_deref(), Some("end of input"));
}

#[test]
fn test_eof_after_signature() {
    let (_, diagnostics) = parse_lossless("function Bool f(Bool a)");
    assert_eq!(diagnostics.len(), 1);
}

// =============================================================================
// SECTION 3: MISSING AND STRAY TOKENS
// =============================================================================

#[test]
fn test_missing_closer_before_outer_closer() {
    let (tree, diagnostics) = parse_lossless(
        "module mkA(); rule r; x <= 1; endmodule\nmodule mkB(); endmodule",
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected.as_deref(), Some("'endrule'"));
    assert_eq!(diagnostics[0].span.line, 1);

    let names: Vec<String> = tree
        .syntax()
        .descendants()
        .filter_map(ModuleDecl::cast)
        .filter_map(|m| m.name())
        .map(|n| n.text())
        .collect();
    assert_eq!(names, vec!["mkA", "mkB"]);
}

#[test]
fn test_missing_semicolon_keeps_following_statement() {
    let (tree, diagnostics) =
        parse_lossless("module mkM(); rule r; x <= 1 y <= 2; endrule endmodule");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("';'"));
    assert_eq!(count(&tree, SyntaxKind::AssignmentStmt), 2);
}

#[test]
fn test_garbage_statement_in_rule() {
    let (tree, diagnostics) =
        parse_lossless("module mkM(); rule r; 42 42 42; x <= 1; endrule endmodule");
    assert!(!diagnostics.is_empty());
    let rule = tree
        .syntax()
        .descendants()
        .find_map(RuleDecl::cast)
        .unwrap();
    assert_eq!(rule.name().unwrap().text(), "r");
    assert_eq!(count(&tree, SyntaxKind::AssignmentStmt), 1);
}

#[test]
fn test_stray_tokens_between_definitions() {
    let (tree, diagnostics) =
        parse_lossless("package P; 1 + 2; typedef Bit#(8) Byte; ) ) endpackage");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(count(&tree, SyntaxKind::TypedefDecl), 1);
    assert_eq!(count(&tree, SyntaxKind::PackageDecl), 1);
}

#[test]
fn test_garbage_in_module_body() {
    let (tree, diagnostics) = parse_lossless(
        "module mkM(); 1 2 3; Reg#(Bit#(8)) r <- mkReg(0); rule tick; r <= r + 1; endrule endmodule",
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(count(&tree, SyntaxKind::VariableDecl), 1);
    assert_eq!(count(&tree, SyntaxKind::RuleDecl), 1);
}

// =============================================================================
// SECTION 4: LEXICAL ERRORS
// =============================================================================

#[test]
fn test_lexical_error_not_duplicated() {
    let source = "module mkM(); rule r; x <= §; endrule endmodule";
    let (_, diagnostics) = parse_lossless(source);
    let offset = source.find('§').unwrap();
    let at_char: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.span.start == offset)
        .collect();
    assert_eq!(at_char.len(), 1);
    assert_eq!(at_char[0].kind, DiagnosticKind::Lexical);
}

#[test]
fn test_unterminated_string() {
    let (_, diagnostics) = parse_lossless("module mkM(); rule r; s <= \"open");
    let lexical = of_kind(&diagnostics, DiagnosticKind::Lexical);
    assert_eq!(lexical.len(), 1);
    assert!(lexical[0].message.contains("unterminated string"));
}

#[test]
fn test_unterminated_block_comment() {
    let (_, diagnostics) = parse_lossless("package P; /* never closed\nendpackage");
    let lexical = of_kind(&diagnostics, DiagnosticKind::Lexical);
    assert_eq!(lexical.len(), 1);
    assert!(lexical[0].message.contains("unterminated block comment"));
    assert_eq!(of_kind(&diagnostics, DiagnosticKind::UnexpectedEof).len(), 1);
}

#[test]
fn test_unterminated_attribute() {
    let (_, diagnostics) = parse_lossless("(* synthesize \nmodule mkM(); endmodule");
    assert!(diagnostics
        .iter()
        .any(|d| d.message.contains("unterminated attribute")));
}

// =============================================================================
// SECTION 5: DIAGNOSTIC SHAPE
// =============================================================================

#[test]
fn test_diagnostics_sorted_by_position() {
    let (_, diagnostics) = parse_lossless(
        "module mkA(; rule r x <= ; endrule endmodule § module mkB() endmodule",
    );
    assert!(diagnostics.len() >= 3);
    assert!(diagnostics
        .windows(2)
        .all(|w| w[0].span.start <= w[1].span.start));
}

#[test]
fn test_diagnostic_positions_are_one_based() {
    let (_, diagnostics) = parse_lossless("package P;\n  import ;\nendpackage");
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!((d.span.line, d.span.column), (2, 10));
    assert_eq!(d.found.as_deref(), Some("';'"));
}

#[test]
fn test_clean_input_has_no_diagnostics() {
    let (_, diagnostics) = parse_lossless(
        "package P;\n\
           (* synthesize *)\n\
           module mkTop(Empty);\n\
             Reg#(UInt#(4)) count <- mkReg(0);\n\
             rule step (count < 10);\n\
               count <= count + 1;\n\
             endrule\n\
           endmodule : mkTop\n\
         endpackage : P\n",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}
