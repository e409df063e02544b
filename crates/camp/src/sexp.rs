// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # S-expression Writer
//!
//! Shared output buffer for the token-bracket grammar used by both the
//! pattern renderer and the SQL++ encoder.
//!
//! ## Format
//!
//! - Every node opens with `(` immediately followed by its keyword
//! - Every token is followed by exactly one space
//! - Every node closes with `) `
//! - String arguments are double-quoted with `"` and `\` escaped
//!
//! ```text
//! (where (equal (ref "x" ) 1 ) )
//! ```
//!
//! There is no indentation or other whitespace significance.

use std::fmt;

/// Append-only S-expression buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SExprWriter {
    buf: String,
    open: usize,
}

impl SExprWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node: `(tag `
    pub fn open(&mut self, tag: &str) -> &mut Self {
        self.buf.push('(');
        self.buf.push_str(tag);
        self.buf.push(' ');
        self.open += 1;
        self
    }

    /// Close the innermost open node: `) `
    pub fn close(&mut self) -> &mut Self {
        debug_assert!(self.open > 0, "close without a matching open");
        self.buf.push_str(") ");
        self.open = self.open.saturating_sub(1);
        self
    }

    /// Append a bare token: `text `
    pub fn atom(&mut self, text: impl fmt::Display) -> &mut Self {
        use fmt::Write;
        // Writing into a String cannot fail
        let _ = write!(self.buf, "{} ", text);
        self
    }

    /// Append a quoted string token: `"text" `
    pub fn string(&mut self, text: &str) -> &mut Self {
        self.buf.push('"');
        for ch in text.chars() {
            if ch == '"' || ch == '\\' {
                self.buf.push('\\');
            }
            self.buf.push(ch);
        }
        self.buf.push_str("\" ");
        self
    }

    /// Append a complete node with no arguments: `(tag ) `
    pub fn empty_node(&mut self, tag: &str) -> &mut Self {
        self.open(tag).close()
    }

    /// Append a complete node with one string argument: `(tag "arg" ) `
    pub fn string_node(&mut self, tag: &str, arg: &str) -> &mut Self {
        self.open(tag).string(arg).close()
    }

    /// Open a node whose first argument is a string, leaving it open: `(tag "arg" `
    pub fn open_with_string(&mut self, tag: &str, arg: &str) -> &mut Self {
        self.open(tag).string(arg)
    }

    /// Number of nodes opened but not yet closed
    pub fn depth(&self) -> usize {
        self.open
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Finish writing; the trailing separator is dropped
    pub fn finish(mut self) -> String {
        let trimmed = self.buf.trim_end().len();
        self.buf.truncate(trimmed);
        self.buf
    }
}

impl fmt::Display for SExprWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.buf.trim_end())
    }
}

/// Values that render themselves in the S-expression grammar
pub trait WriteSExpr {
    fn write_sexpr(&self, out: &mut SExprWriter);

    fn to_sexpr(&self) -> String {
        let mut out = SExprWriter::new();
        self.write_sexpr(&mut out);
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_nodes() {
        let mut out = SExprWriter::new();
        out.open("where").open("equal").string_node("ref", "x").atom(1);
        out.close().close();
        assert_eq!(out.depth(), 0);
        assert_eq!(out.finish(), r#"(where (equal (ref "x" ) 1 ) )"#);
    }

    #[test]
    fn test_string_escaping() {
        let mut out = SExprWriter::new();
        out.string(r#"say "hi" \o/"#);
        assert_eq!(out.finish(), r#""say \"hi\" \\o/""#);
    }

    #[test]
    fn test_empty_node() {
        let mut out = SExprWriter::new();
        out.empty_node("all");
        assert_eq!(out.as_str(), "(all ) ");
        assert_eq!(out.to_string(), "(all )");
    }

    #[test]
    fn test_open_with_string_tracks_depth() {
        let mut out = SExprWriter::new();
        out.open_with_string("aliasAs", "x");
        assert_eq!(out.depth(), 1);
        out.string_node("table", "t").close();
        assert_eq!(out.finish(), r#"(aliasAs "x" (table "t" ) )"#);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "close without a matching open")]
    fn test_unbalanced_close_panics_in_debug() {
        let mut out = SExprWriter::new();
        out.empty_node("all");
        out.close();
    }
}
