// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! SQL++ expressions as produced by the external SQL++ parser.
//!
//! ## Variables
//!
//! The parser prefixes every variable with `$`, so `SELECT x FROM t AS x`
//! refers to the variables `$x` and `$t`. A [`VariableExpr`] additionally
//! records whether it introduces a new binder (`is_new_var`) and whether its
//! identifier is a named-value (attribute-style) access.
//!
//! ## Operator Expressions
//!
//! [`OperatorExpr`] stores an operand list and an operator list, so
//! `a + b - c` is `exprs = [a, b, c]`, `ops = [Plus, Minus]`. A binary
//! expression has exactly two operands and one operator.
//!
//! ```text
//! OperatorExpr {
//!   exprs: [Variable($x), Literal(1)],
//!   ops: [Gt],
//! }
//! ```
//!
//! Represents: `x > 1`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeKind;
use crate::query::SelectExpression;

/// A SQL++ expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Literal value
    Literal(Literal),

    /// Variable reference (e.g., `$x`)
    Variable(VariableExpr),

    /// Operator chain (e.g., `a > b`, `a + b - c`)
    Operator(OperatorExpr),

    /// Field access (e.g., `$x.name`)
    FieldAccessor { expr: Box<Expr>, field: String },

    /// Index access (e.g., `$x[0]`); `None` is the `[?]` any-index form
    IndexAccessor {
        expr: Box<Expr>,
        index: Option<Box<Expr>>,
    },

    /// Function call (e.g., `count($x)`)
    Call { function: String, args: Vec<Expr> },

    /// CASE expression
    Case {
        condition: Box<Expr>,
        when_exprs: Vec<Expr>,
        then_exprs: Vec<Expr>,
        else_expr: Option<Box<Expr>>,
    },

    /// IF-THEN-ELSE expression
    If {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    /// Ordered (`[...]`) or unordered (`{{...}}`) list constructor
    ListConstructor { ordered: bool, items: Vec<Expr> },

    /// Record constructor as `(name, value)` pairs
    RecordConstructor(Vec<(Expr, Expr)>),

    /// SOME / EVERY quantified expression
    Quantified {
        quantifier: Quantifier,
        bindings: Vec<(VariableExpr, Expr)>,
        satisfies: Box<Expr>,
    },

    /// Unary operation (e.g., `NOT a`, `-x`)
    Unary { op: UnaryOp, expr: Box<Expr> },

    /// Nested SELECT expression
    Select(Box<SelectExpression>),

    /// Subquery that does not reference outer variables
    IndependentSubquery(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(VariableExpr::new(name))
    }

    pub fn int(value: i32) -> Self {
        Expr::Literal(Literal::Integer(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn binary(left: Expr, op: OperatorType, right: Expr) -> Self {
        Expr::Operator(OperatorExpr::binary(left, op, right))
    }

    pub fn field(expr: Expr, field: impl Into<String>) -> Self {
        Expr::FieldAccessor {
            expr: Box::new(expr),
            field: field.into(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Literal(_) => NodeKind::LiteralExpr,
            Expr::Variable(_) => NodeKind::VariableExpr,
            Expr::Operator(_) => NodeKind::OperatorExpr,
            Expr::FieldAccessor { .. } => NodeKind::FieldAccessor,
            Expr::IndexAccessor { .. } => NodeKind::IndexAccessor,
            Expr::Call { .. } => NodeKind::CallExpr,
            Expr::Case { .. } => NodeKind::CaseExpression,
            Expr::If { .. } => NodeKind::IfExpr,
            Expr::ListConstructor { .. } => NodeKind::ListConstructor,
            Expr::RecordConstructor(_) => NodeKind::RecordConstructor,
            Expr::Quantified { .. } => NodeKind::QuantifiedExpression,
            Expr::Unary { .. } => NodeKind::UnaryExpr,
            Expr::Select(_) => NodeKind::SelectExpression,
            Expr::IndependentSubquery(_) => NodeKind::IndependentSubquery,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableExpr> {
        match self {
            Expr::Variable(var) => Some(var),
            _ => None,
        }
    }
}

/// Variable identifier as written by the parser (prefix included)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarIdentifier {
    pub value: String,
    /// Set when the identifier is an attribute-style access on a named value
    pub named_value_access: bool,
}

impl VarIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            named_value_access: false,
        }
    }

    pub fn named_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            named_value_access: true,
        }
    }
}

impl fmt::Display for VarIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Variable reference or binder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableExpr {
    pub var: VarIdentifier,
    /// Set when this occurrence introduces the variable
    pub is_new_var: bool,
}

impl VariableExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            var: VarIdentifier::new(name),
            is_new_var: false,
        }
    }

    pub fn from_identifier(var: VarIdentifier) -> Self {
        Self {
            var,
            is_new_var: false,
        }
    }

    pub fn as_new_var(mut self) -> Self {
        self.is_new_var = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.var.value
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    String(String),
    True,
    False,
    Null,
    Missing,
}

impl Literal {
    pub fn literal_type(&self) -> LiteralType {
        match self {
            Literal::Integer(_) => LiteralType::Integer,
            Literal::Long(_) => LiteralType::Long,
            Literal::Double(_) => LiteralType::Double,
            Literal::Float(_) => LiteralType::Float,
            Literal::String(_) => LiteralType::String,
            Literal::True => LiteralType::True,
            Literal::False => LiteralType::False,
            Literal::Null => LiteralType::Null,
            Literal::Missing => LiteralType::Missing,
        }
    }

    /// Textual value as the parser would print it
    pub fn string_value(&self) -> String {
        match self {
            Literal::Integer(v) => v.to_string(),
            Literal::Long(v) => v.to_string(),
            Literal::Double(v) => v.to_string(),
            Literal::Float(v) => v.to_string(),
            Literal::String(s) => s.clone(),
            Literal::True => "true".to_string(),
            Literal::False => "false".to_string(),
            Literal::Null => "null".to_string(),
            Literal::Missing => "missing".to_string(),
        }
    }
}

/// Literal type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralType {
    Integer,
    Long,
    Double,
    Float,
    String,
    True,
    False,
    Null,
    Missing,
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralType::Integer => "INTEGER",
            LiteralType::Long => "LONG",
            LiteralType::Double => "DOUBLE",
            LiteralType::Float => "FLOAT",
            LiteralType::String => "STRING",
            LiteralType::True => "TRUE",
            LiteralType::False => "FALSE",
            LiteralType::Null => "NULL",
            LiteralType::Missing => "MISSING",
        };
        f.write_str(name)
    }
}

/// Operator chain expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorExpr {
    pub exprs: Vec<Expr>,
    pub ops: Vec<OperatorType>,
}

impl OperatorExpr {
    pub fn binary(left: Expr, op: OperatorType, right: Expr) -> Self {
        Self {
            exprs: vec![left, right],
            ops: vec![op],
        }
    }

    pub fn is_binary(&self) -> bool {
        self.exprs.len() == 2 && self.ops.len() == 1
    }
}

/// SQL++ infix operators
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    // Logical
    Or,
    And,

    // Comparison
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Neq,

    // Arithmetic
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Caret,
    Idiv,

    // String
    Concat,
    FuzzyEq,
    Like,
    NotLike,

    // Other
    In,
    NotIn,
    Between,
    NotBetween,
}

impl OperatorType {
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorType::Or => "or",
            OperatorType::And => "and",
            OperatorType::Lt => "<",
            OperatorType::Gt => ">",
            OperatorType::Le => "<=",
            OperatorType::Ge => ">=",
            OperatorType::Eq => "=",
            OperatorType::Neq => "!=",
            OperatorType::Plus => "+",
            OperatorType::Minus => "-",
            OperatorType::Mul => "*",
            OperatorType::Div => "/",
            OperatorType::Mod => "%",
            OperatorType::Caret => "^",
            OperatorType::Idiv => "div",
            OperatorType::Concat => "||",
            OperatorType::FuzzyEq => "~=",
            OperatorType::Like => "like",
            OperatorType::NotLike => "not like",
            OperatorType::In => "in",
            OperatorType::NotIn => "not in",
            OperatorType::Between => "between",
            OperatorType::NotBetween => "not between",
        }
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Positive,
    Negative,
    Not,
    Exists,
    NotExists,
}

/// Quantifier of a quantified expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Some,
    Every,
}
