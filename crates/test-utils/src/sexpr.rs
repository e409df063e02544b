// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! S-expression reader
//!
//! Parses encoder and pattern output back into a tree so tests can compare
//! structure instead of strings.
//!
//! ```text
//! (where (equal (ref "x" ) 1 ) )
//! ```
//!
//! reads as
//!
//! ```text
//! Node("where", [Node("equal", [Node("ref", [Str("x")]), Atom("1")])])
//! ```

use std::fmt;

use qcert_camp::{SExprWriter, WriteSExpr};
use serde::Serialize;
use thiserror::Error;

/// A parsed S-expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SExpr {
    /// `(tag arg ... )`
    Node { tag: String, args: Vec<SExpr> },
    /// Bare token such as a number or boolean
    Atom(String),
    /// Quoted string, unescaped
    Str(String),
}

/// S-expression reader errors
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum ReadError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Unexpected end of input at byte {pos}")]
    UnexpectedEnd { pos: usize },

    #[error("Unexpected character '{ch}' at byte {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("Node without a tag at byte {pos}")]
    MissingTag { pos: usize },

    #[error("Unterminated string starting at byte {pos}")]
    UnterminatedString { pos: usize },

    #[error("Trailing input at byte {pos}")]
    TrailingInput { pos: usize },
}

impl SExpr {
    pub fn node(tag: impl Into<String>, args: Vec<SExpr>) -> Self {
        SExpr::Node {
            tag: tag.into(),
            args,
        }
    }

    pub fn atom(text: impl fmt::Display) -> Self {
        SExpr::Atom(text.to_string())
    }

    pub fn str(text: impl Into<String>) -> Self {
        SExpr::Str(text.into())
    }

    /// Tag of a node, `None` for leaves
    pub fn tag(&self) -> Option<&str> {
        match self {
            SExpr::Node { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Arguments of a node, empty for leaves
    pub fn args(&self) -> &[SExpr] {
        match self {
            SExpr::Node { args, .. } => args,
            _ => &[],
        }
    }

    /// First direct child node with the given tag
    pub fn child(&self, tag: &str) -> Option<&SExpr> {
        self.args().iter().find(|arg| arg.tag() == Some(tag))
    }

    /// Tags of the direct child nodes, in order
    pub fn child_tags(&self) -> Vec<&str> {
        self.args().iter().filter_map(SExpr::tag).collect()
    }

    /// Whether any node in the tree has the given tag
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tag() == Some(tag) || self.args().iter().any(|arg| arg.contains_tag(tag))
    }

    /// Number of nodes in the tree, leaves excluded
    pub fn node_count(&self) -> usize {
        match self {
            SExpr::Node { args, .. } => 1 + args.iter().map(SExpr::node_count).sum::<usize>(),
            _ => 0,
        }
    }
}

impl WriteSExpr for SExpr {
    fn write_sexpr(&self, out: &mut SExprWriter) {
        match self {
            SExpr::Node { tag, args } => {
                out.open(tag);
                for arg in args {
                    arg.write_sexpr(out);
                }
                out.close();
            }
            SExpr::Atom(text) => {
                out.atom(text);
            }
            SExpr::Str(text) => {
                out.string(text);
            }
        }
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sexpr())
    }
}

/// Parse exactly one S-expression
pub fn read_sexpr(input: &str) -> Result<SExpr, ReadError> {
    let mut reader = Reader::new(input);
    reader.skip_whitespace();
    if reader.peek().is_none() {
        return Err(ReadError::EmptyInput);
    }
    let expr = reader.read()?;
    reader.skip_whitespace();
    match reader.peek() {
        None => Ok(expr),
        Some(_) => Err(ReadError::TrailingInput { pos: reader.pos }),
    }
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn read(&mut self) -> Result<SExpr, ReadError> {
        match self.peek() {
            None => Err(ReadError::UnexpectedEnd { pos: self.pos }),
            Some('(') => self.read_node(),
            Some('"') => self.read_string().map(SExpr::Str),
            Some(ch @ ')') => Err(ReadError::UnexpectedChar { pos: self.pos, ch }),
            Some(_) => Ok(SExpr::Atom(self.read_token().to_string())),
        }
    }

    fn read_node(&mut self) -> Result<SExpr, ReadError> {
        self.bump();
        let tag_pos = self.pos;
        let tag = self.read_token();
        if tag.is_empty() {
            return Err(ReadError::MissingTag { pos: tag_pos });
        }
        let tag = tag.to_string();

        let mut args = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ReadError::UnexpectedEnd { pos: self.pos }),
                Some(')') => {
                    self.bump();
                    return Ok(SExpr::Node { tag, args });
                }
                Some(_) => args.push(self.read()?),
            }
        }
    }

    fn read_string(&mut self) -> Result<String, ReadError> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(ReadError::UnterminatedString { pos: start }),
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(ReadError::UnterminatedString { pos: start }),
                },
                Some(ch) => value.push(ch),
            }
        }
    }

    fn read_token(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| !ch.is_whitespace() && !matches!(ch, '(' | ')' | '"'))
        {
            self.bump();
        }
        &self.input[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_nested() {
        let expr = read_sexpr(r#"(where (equal (ref "x" ) 1 ) )"#).unwrap();
        let expected = SExpr::node(
            "where",
            vec![SExpr::node(
                "equal",
                vec![SExpr::node("ref", vec![SExpr::str("x")]), SExpr::atom(1)],
            )],
        );
        assert_eq!(expr, expected);
        assert_eq!(expr.node_count(), 3);
    }

    #[test]
    fn test_read_escaped_string() {
        let expr = read_sexpr(r#"(ref "a\"b\\c" )"#).unwrap();
        assert_eq!(expr.args(), &[SExpr::str(r#"a"b\c"#)]);
    }

    #[test]
    fn test_display_is_canonical() {
        let text = r#"(query (select (all ) ) (from (table "t" ) ) )"#;
        assert_eq!(read_sexpr(text).unwrap().to_string(), text);
        // Whitespace is not significant on input
        assert_eq!(
            read_sexpr("(query(select (all))\n (from (table \"t\")))")
                .unwrap()
                .to_string(),
            text
        );
    }

    #[test]
    fn test_child_lookup() {
        let expr = read_sexpr(r#"(query (select ) (from ) (where 1 ) )"#).unwrap();
        assert_eq!(expr.child_tags(), vec!["select", "from", "where"]);
        assert_eq!(expr.child("where").map(SExpr::args), Some(&[SExpr::atom(1)][..]));
        assert!(expr.child("having").is_none());
        assert!(expr.contains_tag("from"));
    }

    #[test]
    fn test_read_errors() {
        assert_eq!(read_sexpr("   "), Err(ReadError::EmptyInput));
        assert_eq!(read_sexpr("(a "), Err(ReadError::UnexpectedEnd { pos: 3 }));
        assert_eq!(read_sexpr("( )"), Err(ReadError::MissingTag { pos: 1 }));
        assert_eq!(
            read_sexpr(r#"(a "x )"#),
            Err(ReadError::UnterminatedString { pos: 3 })
        );
        assert_eq!(read_sexpr("(a ) (b )"), Err(ReadError::TrailingInput { pos: 5 }));
        assert_eq!(
            read_sexpr(")"),
            Err(ReadError::UnexpectedChar { pos: 0, ch: ')' })
        );
    }
}
