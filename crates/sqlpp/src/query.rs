// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Queries and Clauses
//!
//! ## Query Structure
//!
//! A [`Query`] wraps a body expression. For SELECT queries the body is an
//! [`Expr::Select`] holding a [`SelectExpression`]:
//!
//! ```text
//! Query
//! └── SelectExpression
//!     ├── let_list
//!     ├── SelectSetOperation
//!     │   ├── left: SetOperationInput (SelectBlock | subquery)
//!     │   └── rights: [SetOperationRight { UNION | INTERSECT | EXCEPT, set_semantics, input }]
//!     ├── order_by
//!     └── limit
//! ```
//!
//! ## SELECT Block
//!
//! [`SelectBlock`] holds the SELECT clause followed by FROM, WHERE, GROUP BY
//! and HAVING:
//!
//! ```sql
//! SELECT x FROM t AS x WHERE x > 1
//! ```
//!
//! ## FROM Terms
//!
//! Every [`FromTerm`] binds a variable to a source expression. The parser
//! always introduces a binding variable, even when none was written, so
//! `FROM t` becomes `FROM $t AS $t`. Joins, nests and unnests hang off a term
//! as correlate clauses.
//!
//! ## Projections
//!
//! A [`Projection`] is either `expr [AS name]` or `*`. The parser fills in a
//! name for every projection, even a plain column reference.

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, VariableExpr};
use crate::node::NodeKind;

/// A top-level query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// The query body, normally a SELECT expression
    pub body: Expr,
    pub top_level: bool,
}

impl Query {
    pub fn new(body: Expr) -> Self {
        Self {
            body,
            top_level: true,
        }
    }

    pub fn select(select: SelectExpression) -> Self {
        Self::new(Expr::Select(Box::new(select)))
    }
}

/// SELECT expression: set operation plus ordering and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectExpression {
    pub let_list: Vec<LetClause>,
    pub select_set_operation: SelectSetOperation,
    pub order_by: Option<OrderbyClause>,
    pub limit: Option<LimitClause>,
    pub subquery: bool,
}

impl SelectExpression {
    pub fn new(select_set_operation: SelectSetOperation) -> Self {
        Self {
            let_list: Vec::new(),
            select_set_operation,
            order_by: None,
            limit: None,
            subquery: false,
        }
    }

    /// A SELECT expression consisting of a single SELECT block
    pub fn from_block(block: SelectBlock) -> Self {
        Self::new(SelectSetOperation::single(SetOperationInput::Select(
            Box::new(block),
        )))
    }

    pub fn with_order_by(mut self, order_by: OrderbyClause) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn with_limit(mut self, limit: LimitClause) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_let(mut self, clause: LetClause) -> Self {
        self.let_list.push(clause);
        self
    }

    pub fn as_subquery(mut self) -> Self {
        self.subquery = true;
        self
    }
}

/// Left input combined with zero or more right inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectSetOperation {
    pub left: SetOperationInput,
    pub rights: Vec<SetOperationRight>,
}

impl SelectSetOperation {
    pub fn single(left: SetOperationInput) -> Self {
        Self {
            left,
            rights: Vec::new(),
        }
    }

    pub fn with_right(mut self, right: SetOperationRight) -> Self {
        self.rights.push(right);
        self
    }

    pub fn has_right_inputs(&self) -> bool {
        !self.rights.is_empty()
    }
}

/// One side of a set operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetOperationInput {
    Select(Box<SelectBlock>),
    Subquery(Box<SelectExpression>),
}

/// Right-hand side of a set operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperationRight {
    pub op_type: SetOpType,
    /// `true` for set (DISTINCT) semantics, `false` for bag (ALL) semantics
    pub set_semantics: bool,
    pub input: SetOperationInput,
}

/// Set operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOpType {
    Union,
    Intersect,
    Except,
}

/// SELECT block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectBlock {
    pub select_clause: SelectClause,
    pub from: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<GroupbyClause>,
    pub having: Option<HavingClause>,
}

impl SelectBlock {
    pub fn new(select_clause: SelectClause, from: FromClause) -> Self {
        Self {
            select_clause,
            from: Some(from),
            where_clause: None,
            group_by: None,
            having: None,
        }
    }

    pub fn with_where(mut self, expr: Expr) -> Self {
        self.where_clause = Some(WhereClause { expr });
        self
    }

    pub fn with_group_by(mut self, group_by: GroupbyClause) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn with_having(mut self, expr: Expr) -> Self {
        self.having = Some(HavingClause { expr });
        self
    }
}

/// SELECT clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectClause {
    pub distinct: bool,
    pub body: SelectBody,
}

impl SelectClause {
    pub fn regular(projections: Vec<Projection>) -> Self {
        Self {
            distinct: false,
            body: SelectBody::Regular(SelectRegular { projections }),
        }
    }

    /// `SELECT VALUE expr`
    pub fn element(expr: Expr) -> Self {
        Self {
            distinct: false,
            body: SelectBody::Element(SelectElement { expr }),
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

/// Body of a SELECT clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectBody {
    Element(SelectElement),
    Regular(SelectRegular),
}

/// `SELECT VALUE expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectElement {
    pub expr: Expr,
}

/// Projection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectRegular {
    pub projections: Vec<Projection>,
}

/// Item in a projection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub expr: Option<Expr>,
    pub name: Option<String>,
    pub star: bool,
}

impl Projection {
    /// `expr AS name`
    pub fn named(expr: Expr, name: impl Into<String>) -> Self {
        Self {
            expr: Some(expr),
            name: Some(name.into()),
            star: false,
        }
    }

    pub fn unnamed(expr: Expr) -> Self {
        Self {
            expr: Some(expr),
            name: None,
            star: false,
        }
    }

    /// `*`
    pub fn star() -> Self {
        Self {
            expr: None,
            name: None,
            star: true,
        }
    }
}

/// FROM clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromClause {
    pub terms: Vec<FromTerm>,
}

impl FromClause {
    pub fn new(terms: Vec<FromTerm>) -> Self {
        Self { terms }
    }
}

/// `expr AS $var` with optional positional variable and correlate clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromTerm {
    pub left_expr: Expr,
    pub left_var: VariableExpr,
    /// `AT $pos`
    pub positional_var: Option<VariableExpr>,
    pub correlate_clauses: Vec<CorrelateClause>,
}

impl FromTerm {
    pub fn new(left_expr: Expr, left_var: VariableExpr) -> Self {
        Self {
            left_expr,
            left_var,
            positional_var: None,
            correlate_clauses: Vec::new(),
        }
    }

    pub fn with_positional_var(mut self, var: VariableExpr) -> Self {
        self.positional_var = Some(var);
        self
    }

    pub fn with_correlate(mut self, clause: CorrelateClause) -> Self {
        self.correlate_clauses.push(clause);
        self
    }

    pub fn has_correlate_clauses(&self) -> bool {
        !self.correlate_clauses.is_empty()
    }
}

/// Clause correlated with a FROM term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CorrelateClause {
    Join(JoinClause),
    Nest(NestClause),
    Unnest(UnnestClause),
}

impl CorrelateClause {
    pub fn kind(&self) -> NodeKind {
        match self {
            CorrelateClause::Join(_) => NodeKind::JoinClause,
            CorrelateClause::Nest(_) => NodeKind::NestClause,
            CorrelateClause::Unnest(_) => NodeKind::UnnestClause,
        }
    }
}

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    LeftOuter,
}

/// JOIN clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub right_expr: Expr,
    pub right_var: VariableExpr,
    pub condition: Expr,
}

/// NEST clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestClause {
    pub join_type: JoinType,
    pub right_expr: Expr,
    pub right_var: VariableExpr,
    pub condition: Expr,
}

/// UNNEST clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnnestClause {
    pub join_type: JoinType,
    pub right_expr: Expr,
    pub right_var: VariableExpr,
}

/// WHERE clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    pub expr: Expr,
}

/// GROUP BY clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupbyClause {
    pub keys: Vec<GroupKey>,
    /// `GROUP AS $g`
    pub group_var: Option<VariableExpr>,
}

impl GroupbyClause {
    pub fn new(keys: Vec<GroupKey>) -> Self {
        Self {
            keys,
            group_var: None,
        }
    }
}

/// Grouping key, optionally bound to a variable (`expr AS $k`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupKey {
    pub expr: Expr,
    pub var: Option<VariableExpr>,
}

/// HAVING clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavingClause {
    pub expr: Expr,
}

/// ORDER BY clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderbyClause {
    pub items: Vec<(Expr, OrderModifier)>,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderModifier {
    Asc,
    Desc,
}

/// LIMIT clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitClause {
    pub limit: Expr,
    pub offset: Option<Expr>,
}

/// LET clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetClause {
    pub var: VariableExpr,
    pub expr: Expr,
}
