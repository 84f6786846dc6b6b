//! Lossless Round-Trip Test Suite
//!
//! Concatenating the token texts, or printing the tree, must give back the
//! input byte for byte, whether or not it parses cleanly.

use bsvsyn_frontend::{parse, tokenize, SyntaxKind};

const COUNTER: &str = r#"// Counter with a reset method
package Counter;

import StmtFSM :: *;

typedef enum { Idle, Busy } State deriving (Bits, Eq);

interface Counter_IFC;
    method Action reset;   // clear
    method Bit#(8) value;
endinterface

(* synthesize *)
module mkCounter(Counter_IFC);
    Reg#(Bit#(8)) count <- mkReg(0);
    Reg#(State)   state <- mkReg(Idle);

    /* count while busy */
    rule tick (state == Busy);
        count <= count + 1;
        if (count[7:4] == 4'hF)
            state <= Idle;
    endrule : tick

    method Action reset;
        count <= 0;
    endmethod

    method Bit#(8) value;
        return count;
    endmethod
endmodule : mkCounter

endpackage : Counter
"#;

fn assert_round_trip(source: &str) {
    let from_tokens: String = tokenize(source)
        .iter()
        .map(|t| &source[t.span.clone()])
        .collect();
    assert_eq!(from_tokens, source, "token texts differ from input");

    let (tree, _) = parse(source);
    assert_eq!(tree.text(), source, "tree text differs from input");
    assert_eq!(
        usize::from(tree.syntax().text_range().end()),
        source.len()
    );
}

#[test]
fn test_empty_and_trivia_only() {
    assert_round_trip("");
    assert_round_trip("   \n\t\r\n");
    assert_round_trip("// only a comment");
    assert_round_trip("/* block */\n(* attr *)\n");
}

#[test]
fn test_full_package() {
    assert_round_trip(COUNTER);
}

#[test]
fn test_windows_line_endings() {
    assert_round_trip(&COUNTER.replace('\n', "\r\n"));
}

#[test]
fn test_malformed_inputs() {
    for source in [
        "module mkFoo( rule tick; endrule endmodule",
        "package P; module",
        "endmodule endrule ) ) ;;",
        "x <= <= <= ;",
        "function Bool f(; return ((a; endfunction",
        "typedef struct { Bit#(8) a Bool b; } S;",
        "case (x) 1: 2: default endcase",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_unterminated_constructs() {
    assert_round_trip("module mkM(); rule r; s <= \"no end");
    assert_round_trip("package P; /* no end\nendpackage");
    assert_round_trip("(* synthesize\nmodule mkM(); endmodule");
    assert_round_trip("x <= \"line\\\"s\" // tail");
}

#[test]
fn test_unicode_and_invalid_characters() {
    assert_round_trip("package Π; endpackage");
    assert_round_trip("// комментарий\npackage P; endpackage");
    assert_round_trip("module mkM(); rule r; x <= 😀 + 1; endrule endmodule");
    assert_round_trip("§§§ @ ` \u{0}");
}

#[test]
fn test_trivia_is_kept_in_tree() {
    let (tree, diagnostics) = parse(COUNTER);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let tokens: Vec<_> = tree
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .collect();
    let comments = tokens
        .iter()
        .filter(|t| t.kind() == SyntaxKind::Comment)
        .count();
    assert_eq!(comments, 3);
    assert!(tokens.iter().any(|t| t.kind() == SyntaxKind::Attribute));
    assert_eq!(tokens.len(), tokenize(COUNTER).len());
}

#[test]
fn test_leading_trivia_outside_nodes() {
    let (tree, _) = parse("  // note\n  package P; endpackage");
    let package = tree
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::PackageDecl)
        .unwrap();
    assert_eq!(package.text().to_string(), "package P; endpackage");
}
