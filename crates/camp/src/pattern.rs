// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Pattern Calculus
//!
//! The CAMP pattern AST. Rule chains compile into this representation,
//! which is then handed to the backend unchanged.
//!
//! ## Forms
//!
//! | Variant       | Rendering                  | Meaning                                   |
//! |---------------|----------------------------|-------------------------------------------|
//! | `Const`       | `(pconst d )`              | constant data                             |
//! | `Unary`       | `(punop op p )`            | apply a unary operator to `p`'s result    |
//! | `Binary`      | `(pbinop op p1 p2 )`       | apply a binary operator                   |
//! | `Map`         | `(pmap p )`                | run `p` on each element of `it`           |
//! | `Assert`      | `(passert p )`             | fail the match unless `p` yields true     |
//! | `OrElse`      | `(porElse p1 p2 )`         | `p1`, falling back to `p2` on match fail  |
//! | `It`          | `(pit )`                   | the current value                         |
//! | `LetIt`       | `(pletIt p1 p2 )`          | rebind `it` to `p1`'s result in `p2`      |
//! | `GetConstant` | `(pgetConstant "name" )`   | a global constant such as `WORLD`         |
//! | `Env`         | `(penv )`                  | the current environment                   |
//! | `LetEnv`      | `(pletEnv p1 p2 )`         | extend the environment with `p1` in `p2`  |
//! | `Left`        | `(pleft )`                 | left projection of an either value        |
//! | `Right`       | `(pright )`                | right projection of an either value       |
//!
//! Patterns are plain values: constructors assemble nodes and never evaluate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Data;
use crate::ops::{BinaryOperator, UnaryOperator};
use crate::sexp::{SExprWriter, WriteSExpr};

/// A CAMP pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    Const(Data),
    Unary(UnaryOperator, Box<Pattern>),
    Binary(BinaryOperator, Box<Pattern>, Box<Pattern>),
    Map(Box<Pattern>),
    Assert(Box<Pattern>),
    OrElse(Box<Pattern>, Box<Pattern>),
    It,
    LetIt(Box<Pattern>, Box<Pattern>),
    GetConstant(String),
    Env,
    LetEnv(Box<Pattern>, Box<Pattern>),
    Left,
    Right,
}

impl Pattern {
    pub fn unary(op: UnaryOperator, inner: Pattern) -> Self {
        Pattern::Unary(op, Box::new(inner))
    }

    pub fn binary(op: BinaryOperator, left: Pattern, right: Pattern) -> Self {
        Pattern::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn map(inner: Pattern) -> Self {
        Pattern::Map(Box::new(inner))
    }

    pub fn assert(inner: Pattern) -> Self {
        Pattern::Assert(Box::new(inner))
    }

    pub fn or_else(first: Pattern, fallback: Pattern) -> Self {
        Pattern::OrElse(Box::new(first), Box::new(fallback))
    }

    pub fn let_it(binding: Pattern, body: Pattern) -> Self {
        Pattern::LetIt(Box::new(binding), Box::new(body))
    }

    pub fn let_env(binding: Pattern, body: Pattern) -> Self {
        Pattern::LetEnv(Box::new(binding), Box::new(body))
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Pattern::GetConstant(name.into())
    }

    /// The keyword this node renders with
    pub fn tag(&self) -> &'static str {
        match self {
            Pattern::Const(_) => "pconst",
            Pattern::Unary(..) => "punop",
            Pattern::Binary(..) => "pbinop",
            Pattern::Map(_) => "pmap",
            Pattern::Assert(_) => "passert",
            Pattern::OrElse(..) => "porElse",
            Pattern::It => "pit",
            Pattern::LetIt(..) => "pletIt",
            Pattern::GetConstant(_) => "pgetConstant",
            Pattern::Env => "penv",
            Pattern::LetEnv(..) => "pletEnv",
            Pattern::Left => "pleft",
            Pattern::Right => "pright",
        }
    }

    /// Number of nodes in this pattern tree
    pub fn size(&self) -> usize {
        1 + match self {
            Pattern::Unary(_, p) | Pattern::Map(p) | Pattern::Assert(p) => p.size(),
            Pattern::Binary(_, a, b)
            | Pattern::OrElse(a, b)
            | Pattern::LetIt(a, b)
            | Pattern::LetEnv(a, b) => a.size() + b.size(),
            Pattern::Const(_)
            | Pattern::It
            | Pattern::GetConstant(_)
            | Pattern::Env
            | Pattern::Left
            | Pattern::Right => 0,
        }
    }
}

impl WriteSExpr for Pattern {
    fn write_sexpr(&self, out: &mut SExprWriter) {
        out.open(self.tag());
        match self {
            Pattern::Const(d) => d.write_sexpr(out),
            Pattern::Unary(op, p) => {
                op.write_sexpr(out);
                p.write_sexpr(out);
            }
            Pattern::Binary(op, a, b) => {
                op.write_sexpr(out);
                a.write_sexpr(out);
                b.write_sexpr(out);
            }
            Pattern::Map(p) | Pattern::Assert(p) => p.write_sexpr(out),
            Pattern::OrElse(a, b) | Pattern::LetIt(a, b) | Pattern::LetEnv(a, b) => {
                a.write_sexpr(out);
                b.write_sexpr(out);
            }
            Pattern::GetConstant(name) => {
                out.string(name);
            }
            Pattern::It | Pattern::Env | Pattern::Left | Pattern::Right => {}
        }
        out.close();
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sexpr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_rendering() {
        assert_eq!(Pattern::It.to_string(), "(pit )");
        assert_eq!(Pattern::Env.to_string(), "(penv )");
        assert_eq!(
            Pattern::constant("WORLD").to_string(),
            r#"(pgetConstant "WORLD" )"#
        );
    }

    #[test]
    fn test_nested_rendering() {
        let p = Pattern::let_env(
            Pattern::unary(UnaryOperator::OpRec("x".into()), Pattern::It),
            Pattern::Const(Data::Nat(1)),
        );
        assert_eq!(
            p.to_string(),
            r#"(pletEnv (punop (OpRec "x" ) (pit ) ) (pconst (dnat 1 ) ) )"#
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Pattern::map(Pattern::unary(UnaryOperator::OpBag, Pattern::It));
        let b = Pattern::map(Pattern::unary(UnaryOperator::OpBag, Pattern::It));
        let c = Pattern::map(Pattern::unary(UnaryOperator::OpFlatten, Pattern::It));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_size() {
        let p = Pattern::binary(BinaryOperator::OpAnd, Pattern::It, Pattern::Env);
        assert_eq!(p.size(), 3);
        assert_eq!(Pattern::Left.size(), 1);
    }
}
