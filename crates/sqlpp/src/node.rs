// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Uniform view over every node kind in the tree.
//!
//! [`Node`] borrows a node of any kind so a single entry point can dispatch
//! on it with one exhaustive `match`. [`NodeKind`] names node kinds in
//! diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, Literal, OperatorExpr, VariableExpr};
use crate::query::{
    CorrelateClause, FromClause, FromTerm, GroupbyClause, HavingClause, LetClause, LimitClause,
    OrderbyClause, Projection, Query, SelectBlock, SelectClause, SelectElement,
    SelectExpression, SelectRegular, SelectSetOperation, WhereClause,
};
use crate::statement::Statement;

/// Borrowed reference to any SQL++ node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Statement(&'a Statement),
    Query(&'a Query),
    Expr(&'a Expr),
    Literal(&'a Literal),
    Variable(&'a VariableExpr),
    Operator(&'a OperatorExpr),
    SelectExpression(&'a SelectExpression),
    SelectSetOperation(&'a SelectSetOperation),
    SelectBlock(&'a SelectBlock),
    SelectClause(&'a SelectClause),
    SelectElement(&'a SelectElement),
    SelectRegular(&'a SelectRegular),
    Projection(&'a Projection),
    FromClause(&'a FromClause),
    FromTerm(&'a FromTerm),
    Correlate(&'a CorrelateClause),
    Where(&'a WhereClause),
    GroupBy(&'a GroupbyClause),
    Having(&'a HavingClause),
    OrderBy(&'a OrderbyClause),
    Limit(&'a LimitClause),
    Let(&'a LetClause),
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Statement(s) => s.kind(),
            Node::Query(_) => NodeKind::Query,
            Node::Expr(e) => e.kind(),
            Node::Literal(_) => NodeKind::LiteralExpr,
            Node::Variable(_) => NodeKind::VariableExpr,
            Node::Operator(_) => NodeKind::OperatorExpr,
            Node::SelectExpression(_) => NodeKind::SelectExpression,
            Node::SelectSetOperation(_) => NodeKind::SelectSetOperation,
            Node::SelectBlock(_) => NodeKind::SelectBlock,
            Node::SelectClause(_) => NodeKind::SelectClause,
            Node::SelectElement(_) => NodeKind::SelectElement,
            Node::SelectRegular(_) => NodeKind::SelectRegular,
            Node::Projection(_) => NodeKind::Projection,
            Node::FromClause(_) => NodeKind::FromClause,
            Node::FromTerm(_) => NodeKind::FromTerm,
            Node::Correlate(c) => c.kind(),
            Node::Where(_) => NodeKind::WhereClause,
            Node::GroupBy(_) => NodeKind::GroupbyClause,
            Node::Having(_) => NodeKind::HavingClause,
            Node::OrderBy(_) => NodeKind::OrderbyClause,
            Node::Limit(_) => NodeKind::LimitClause,
            Node::Let(_) => NodeKind::LetClause,
        }
    }
}

macro_rules! impl_from_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Node<'a> {
                fn from(node: &'a $ty) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    Statement => Statement,
    Query => Query,
    Expr => Expr,
    Literal => Literal,
    VariableExpr => Variable,
    OperatorExpr => Operator,
    SelectExpression => SelectExpression,
    SelectSetOperation => SelectSetOperation,
    SelectBlock => SelectBlock,
    SelectClause => SelectClause,
    SelectElement => SelectElement,
    SelectRegular => SelectRegular,
    Projection => Projection,
    FromClause => FromClause,
    FromTerm => FromTerm,
    CorrelateClause => Correlate,
    WhereClause => Where,
    GroupbyClause => GroupBy,
    HavingClause => Having,
    OrderbyClause => OrderBy,
    LimitClause => Limit,
    LetClause => Let,
}

/// Node kind names used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    // Statements
    Query,
    InsertStatement,
    DeleteStatement,
    UpdateStatement,
    LoadStatement,
    SetStatement,
    DataverseDecl,
    DatasetDecl,
    TypeDecl,
    FunctionDecl,

    // Expressions
    LiteralExpr,
    VariableExpr,
    OperatorExpr,
    FieldAccessor,
    IndexAccessor,
    CallExpr,
    CaseExpression,
    IfExpr,
    ListConstructor,
    RecordConstructor,
    QuantifiedExpression,
    UnaryExpr,
    IndependentSubquery,

    // SELECT structure
    SelectExpression,
    SelectSetOperation,
    SelectBlock,
    SelectClause,
    SelectElement,
    SelectRegular,
    Projection,

    // Clauses
    FromClause,
    FromTerm,
    JoinClause,
    NestClause,
    UnnestClause,
    WhereClause,
    GroupbyClause,
    HavingClause,
    OrderbyClause,
    LimitClause,
    LetClause,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
