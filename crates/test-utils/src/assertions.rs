// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! S-expression test helpers and custom assertions

use qcert_camp::Pattern;

use crate::sexpr::{SExpr, read_sexpr};

/// Custom assertion helpers for encoder and pattern output
pub struct SExprAssertions;

impl SExprAssertions {
    /// Assert that `text` is exactly one well-formed S-expression and return it
    pub fn assert_well_formed(text: &str) -> SExpr {
        match read_sexpr(text) {
            Ok(expr) => expr,
            Err(e) => panic!("Expected a well-formed S-expression, got {}: {}", e, text),
        }
    }

    /// Assert that `text` reads back as `expected`
    pub fn assert_reads_as(text: &str, expected: &SExpr) {
        let actual = Self::assert_well_formed(text);
        assert_eq!(
            &actual, expected,
            "S-expression mismatch\n  actual:   {}\n  expected: {}",
            actual, expected
        );
    }

    /// Assert that `text` is a node with the given tag
    pub fn assert_tag(text: &str, tag: &str) -> SExpr {
        let expr = Self::assert_well_formed(text);
        assert_eq!(expr.tag(), Some(tag), "Expected tag '{}' in {}", tag, text);
        expr
    }

    /// Assert that the direct children of `expr` carry exactly these tags
    pub fn assert_child_tags(expr: &SExpr, tags: &[&str]) {
        assert_eq!(expr.child_tags(), tags, "Child tags mismatch in {}", expr);
    }

    /// Assert that a pattern renders as a well-formed S-expression
    pub fn assert_pattern_well_formed(pattern: &Pattern) -> SExpr {
        Self::assert_well_formed(&pattern.to_string())
    }
}

/// Helper to count the nodes with a given tag
pub fn count_tag(expr: &SExpr, tag: &str) -> usize {
    let own = usize::from(expr.tag() == Some(tag));
    own + expr.args().iter().map(|arg| count_tag(arg, tag)).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tag() {
        let expr = SExprAssertions::assert_well_formed(
            r#"(query (union (query (select (all ) ) ) (query (select (all ) ) ) ) )"#,
        );
        assert_eq!(count_tag(&expr, "query"), 3);
        assert_eq!(count_tag(&expr, "all"), 2);
        assert_eq!(count_tag(&expr, "where"), 0);
    }

    #[test]
    fn test_assert_pattern_well_formed() {
        let expr = SExprAssertions::assert_pattern_well_formed(&Pattern::It);
        assert_eq!(expr.tag(), Some("pit"));
    }

    #[test]
    #[should_panic(expected = "well-formed")]
    fn test_malformed_panics() {
        SExprAssertions::assert_well_formed("(query ");
    }
}
