// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Operators
//!
//! Unary and binary operators of the pattern calculus. They render as
//! keyword-first nodes, e.g. `(OpFlatten )` or `(OpDot "name" )`.

use serde::{Deserialize, Serialize};

use crate::sexp::{SExprWriter, WriteSExpr};

/// Unary operators
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    OpIdentity,
    OpNeg,
    /// Wrap a value as a one-element bag
    OpBag,
    OpCount,
    /// Flatten a bag of bags by one level
    OpFlatten,
    OpDistinct,
    OpSum,
    OpLeft,
    OpRight,
    OpToString,
    /// Build a single-field record
    OpRec(String),
    /// Project a record field
    OpDot(String),
    /// Remove a record field
    OpRecRemove(String),
    /// Keep only the given record fields
    OpRecProject(Vec<String>),
}

impl UnaryOperator {
    pub fn tag(&self) -> &'static str {
        match self {
            UnaryOperator::OpIdentity => "OpIdentity",
            UnaryOperator::OpNeg => "OpNeg",
            UnaryOperator::OpBag => "OpBag",
            UnaryOperator::OpCount => "OpCount",
            UnaryOperator::OpFlatten => "OpFlatten",
            UnaryOperator::OpDistinct => "OpDistinct",
            UnaryOperator::OpSum => "OpSum",
            UnaryOperator::OpLeft => "OpLeft",
            UnaryOperator::OpRight => "OpRight",
            UnaryOperator::OpToString => "OpToString",
            UnaryOperator::OpRec(_) => "OpRec",
            UnaryOperator::OpDot(_) => "OpDot",
            UnaryOperator::OpRecRemove(_) => "OpRecRemove",
            UnaryOperator::OpRecProject(_) => "OpRecProject",
        }
    }
}

impl WriteSExpr for UnaryOperator {
    fn write_sexpr(&self, out: &mut SExprWriter) {
        out.open(self.tag());
        match self {
            UnaryOperator::OpRec(field)
            | UnaryOperator::OpDot(field)
            | UnaryOperator::OpRecRemove(field) => {
                out.string(field);
            }
            UnaryOperator::OpRecProject(fields) => {
                for field in fields {
                    out.string(field);
                }
            }
            _ => {}
        }
        out.close();
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    OpEqual,
    OpLt,
    OpLe,
    OpAnd,
    OpOr,
    OpRecConcat,
    OpRecMerge,
    OpUnion,
    OpMinus,
    OpMin,
    OpMax,
    OpContains,
    OpStringConcat,
}

impl BinaryOperator {
    pub fn tag(&self) -> &'static str {
        match self {
            BinaryOperator::OpEqual => "OpEqual",
            BinaryOperator::OpLt => "OpLt",
            BinaryOperator::OpLe => "OpLe",
            BinaryOperator::OpAnd => "OpAnd",
            BinaryOperator::OpOr => "OpOr",
            BinaryOperator::OpRecConcat => "OpRecConcat",
            BinaryOperator::OpRecMerge => "OpRecMerge",
            BinaryOperator::OpUnion => "OpUnion",
            BinaryOperator::OpMinus => "OpMinus",
            BinaryOperator::OpMin => "OpMin",
            BinaryOperator::OpMax => "OpMax",
            BinaryOperator::OpContains => "OpContains",
            BinaryOperator::OpStringConcat => "OpStringConcat",
        }
    }
}

impl WriteSExpr for BinaryOperator {
    fn write_sexpr(&self, out: &mut SExprWriter) {
        out.empty_node(self.tag());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_rendering() {
        assert_eq!(UnaryOperator::OpFlatten.to_sexpr(), "(OpFlatten )");
        assert_eq!(
            UnaryOperator::OpDot("name".into()).to_sexpr(),
            r#"(OpDot "name" )"#
        );
        assert_eq!(
            UnaryOperator::OpRecProject(vec!["a".into(), "b".into()]).to_sexpr(),
            r#"(OpRecProject "a" "b" )"#
        );
    }

    #[test]
    fn test_binary_rendering() {
        assert_eq!(BinaryOperator::OpRecConcat.to_sexpr(), "(OpRecConcat )");
    }
}
