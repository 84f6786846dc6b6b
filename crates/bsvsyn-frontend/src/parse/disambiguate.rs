//! Lookahead that picks between productions sharing a prefix
//!
//! None of these helpers consume tokens; they only scan ahead from the
//! current position and report which production the caller should run.

use super::ParseState;
use crate::lexer::TokenWithPos;
use crate::syntax::SyntaxKind;

/// Tokens a lookahead scan never crosses
fn ends_scan(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Semicolon
        || kind.is_block_closer()
        || kind.is_definition_start()
        || kind.is_member_start()
}

/// For every `[`, the token index of its matching `]`
///
/// A pair only matches when no scan-ending token lies between the two
/// brackets; every `[` still open at such a token stays unmatched.
pub(super) fn match_brackets(tokens: &[TokenWithPos]) -> Vec<Option<usize>> {
    let mut matches = vec![None; tokens.len()];
    let mut open = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if token.token.is_trivia() {
            continue;
        }
        match SyntaxKind::from(token.token) {
            SyntaxKind::LBracket => open.push(index),
            SyntaxKind::RBracket => {
                if let Some(start) = open.pop() {
                    matches[start] = Some(index);
                }
            }
            kind if ends_scan(kind) => open.clear(),
            _ => {}
        }
    }
    matches
}

impl ParseState<'_> {
    pub(super) fn at_type_start(&self) -> bool {
        self.current_kind()
            .is_some_and(|k| k.is_primitive_type() || k == SyntaxKind::Ident)
    }

    /// `Type name` or `Type#(...) name` at the start of a body item
    pub(super) fn at_variable_decl(&self) -> bool {
        match self.current_kind() {
            Some(kind) if kind.is_primitive_type() => true,
            Some(SyntaxKind::Ident) => matches!(
                self.peek_kind(1),
                Some(SyntaxKind::Ident | SyntaxKind::Hash)
            ),
            _ => false,
        }
    }

    /// After `method`: is there a return type before the method name?
    pub(super) fn at_method_return_type(&self) -> bool {
        self.at_variable_decl()
    }

    /// At an identifier: does the assignment-target grammar
    /// `ident ([ e (: e)? ])?` end right before `<=`?
    ///
    /// When it does not, the statement is parsed as an expression and any
    /// later `<=` is a comparison. Bracket pairs are matched once up front,
    /// so this costs the same however long the index expression is.
    pub(super) fn at_assignment(&self) -> bool {
        if self.current_kind() != Some(SyntaxKind::Ident) {
            return false;
        }

        let Some(next) = self.nth_index(1) else {
            return false;
        };
        match SyntaxKind::from(self.tokens[next].token) {
            SyntaxKind::Le => true,
            SyntaxKind::LBracket => match self.bracket_matches[next] {
                Some(close) => self.kind_after(close) == Some(SyntaxKind::Le),
                None => false,
            },
            _ => false,
        }
    }

    /// Kind of the first non-trivia token after token index `index`
    fn kind_after(&self, index: usize) -> Option<SyntaxKind> {
        self.tokens[index + 1..]
            .iter()
            .find(|t| !t.token.is_trivia())
            .map(|t| SyntaxKind::from(t.token))
    }

    /// At the `(` after a module name: is this a parameter list, i.e. is the
    /// matching `)` followed by the interface header's `(`?
    pub(super) fn at_module_parameter_list(&self) -> bool {
        let mut kinds = self.significant_kinds();
        if kinds.next() != Some(SyntaxKind::LParen) {
            return false;
        }

        let mut depth = 1usize;
        while let Some(kind) = kinds.next() {
            match kind {
                SyntaxKind::LParen => depth += 1,
                SyntaxKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return kinds.next() == Some(SyntaxKind::LParen);
                    }
                }
                _ if ends_scan(kind) => return false,
                _ => {}
            }
        }
        false
    }

    /// After a method signature's `;`: is `endmethod` reachable before any
    /// other declaration keyword or block closer?
    pub(super) fn method_has_body(&self) -> bool {
        for kind in self.significant_kinds() {
            match kind {
                SyntaxKind::EndmethodKw => return true,
                // Nested case statements close inside the body
                SyntaxKind::EndcaseKw => {}
                _ if kind.is_block_closer()
                    || kind.is_definition_start()
                    || kind.is_member_start() =>
                {
                    return false
                }
                _ => {}
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::match_brackets;
    use crate::config::ParseConfig;
    use crate::parse::ParseState;

    fn state(source: &str) -> ParseState<'_> {
        ParseState::new(source, ParseConfig::default())
    }

    #[test]
    fn test_assignment_lookahead() {
        assert!(state("x <= 1;").at_assignment());
        assert!(state("x[3] <= 1;").at_assignment());
        assert!(state("x[3:0] <= y;").at_assignment());
        assert!(state("x[a[1]] <= y;").at_assignment());
        assert!(!state("x[3] + 1 <= y;").at_assignment());
        assert!(!state("f(x) <= y;").at_assignment());
        assert!(!state("x;").at_assignment());
        assert!(!state("x[1; y <= 2;").at_assignment());
        assert!(!state("x[1 endrule y[2] <= 3;").at_assignment());
        assert!(!state("x[").at_assignment());
        assert!(!state("x").at_assignment());
    }

    #[test]
    fn test_bracket_matching() {
        let source = "a[b[1]] <= c[2; d[3 ] [";
        let tokens = crate::lexer::Lexer::new(source).tokenize();
        let matches = match_brackets(&tokens);

        let pairs: Vec<(usize, usize)> = matches
            .iter()
            .enumerate()
            .filter_map(|(open, close)| {
                close.map(|close| (tokens[open].span.start, tokens[close].span.start))
            })
            .collect();
        // `a[`, `b[` and `d[`; `c[` is cut off by the `;`, the last `[` never closes
        assert_eq!(pairs, vec![(1, 6), (3, 5), (17, 20)]);
    }

    #[test]
    fn test_variable_decl_lookahead() {
        assert!(state("Bool b;").at_variable_decl());
        assert!(state("Reg#(Bit#(8)) r <- mkReg(0);").at_variable_decl());
        assert!(state("Counter c <- mkCounter;").at_variable_decl());
        assert!(!state("c.incr();").at_variable_decl());
        assert!(!state("x <= 1;").at_variable_decl());
    }

    #[test]
    fn test_method_return_type_lookahead() {
        assert!(state("Bool isReady;").at_method_return_type());
        assert!(state("ActionValue#(Bit#(8)) pop;").at_method_return_type());
        assert!(!state("start;").at_method_return_type());
        assert!(!state("start(Bit#(8) x);").at_method_return_type());
        assert!(!state("start if (ok);").at_method_return_type());
    }

    #[test]
    fn test_module_parameter_list_lookahead() {
        assert!(state("(Bit#(8) init)(Counter);").at_module_parameter_list());
        assert!(!state("(Counter);").at_module_parameter_list());
        assert!(!state("();").at_module_parameter_list());
        assert!(!state("( rule tick; endrule").at_module_parameter_list());
    }

    #[test]
    fn test_method_body_lookahead() {
        assert!(state("x <= 1; endmethod").method_has_body());
        assert!(state("case (s) 0: x <= 1; endcase endmethod").method_has_body());
        assert!(state("endmethod").method_has_body());
        assert!(!state("method Bool other;").method_has_body());
        assert!(!state("endinterface").method_has_body());
        assert!(!state("x <= 1; endrule endmethod").method_has_body());
        assert!(!state("").method_has_body());
    }
}
