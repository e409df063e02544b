// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL++ Abstract Syntax Tree
//!
//! The SQL++ tree as handed over by the external SQL++ parser. The tree is
//! read-only input to the S-expression encoder; nothing in this crate
//! rewrites it.
//!
//! - [`statement`]: top-level statements
//! - [`query`]: queries, SELECT blocks and clauses
//! - [`expr`]: expressions, literals and operators
//! - [`node`]: a borrowed view over any node, for single-point dispatch

pub mod expr;
pub mod node;
pub mod query;
pub mod statement;

pub use expr::{
    Expr, Literal, LiteralType, OperatorExpr, OperatorType, Quantifier, UnaryOp, VarIdentifier,
    VariableExpr,
};
pub use node::{Node, NodeKind};
pub use query::{
    CorrelateClause, FromClause, FromTerm, GroupKey, GroupbyClause, HavingClause, JoinClause,
    JoinType, LetClause, LimitClause, NestClause, OrderModifier, OrderbyClause, Projection, Query,
    SelectBlock, SelectBody, SelectClause, SelectElement, SelectExpression, SelectRegular,
    SelectSetOperation, SetOpType, SetOperationInput, SetOperationRight, UnnestClause,
    WhereClause,
};
pub use statement::Statement;
