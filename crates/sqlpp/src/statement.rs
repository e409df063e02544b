// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Top-level SQL++ statements

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, VariableExpr};
use crate::node::NodeKind;
use crate::query::Query;

/// A SQL++ statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Query(Query),
    Insert {
        dataset: String,
        query: Query,
    },
    Delete {
        dataset: String,
        var: Option<VariableExpr>,
        condition: Option<Expr>,
    },
    Update {
        target: Expr,
        assignments: Vec<(Expr, Expr)>,
        condition: Option<Expr>,
    },
    Load {
        dataset: String,
        adapter: String,
    },
    /// `SET name "value"`
    Set {
        name: String,
        value: String,
    },
    DataverseDecl {
        name: String,
    },
    DatasetDecl {
        name: String,
        item_type: String,
    },
    TypeDecl {
        name: String,
    },
    FunctionDecl {
        name: String,
        params: Vec<VariableExpr>,
        body: Expr,
    },
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Query(_) => NodeKind::Query,
            Statement::Insert { .. } => NodeKind::InsertStatement,
            Statement::Delete { .. } => NodeKind::DeleteStatement,
            Statement::Update { .. } => NodeKind::UpdateStatement,
            Statement::Load { .. } => NodeKind::LoadStatement,
            Statement::Set { .. } => NodeKind::SetStatement,
            Statement::DataverseDecl { .. } => NodeKind::DataverseDecl,
            Statement::DatasetDecl { .. } => NodeKind::DatasetDecl,
            Statement::TypeDecl { .. } => NodeKind::TypeDecl,
            Statement::FunctionDecl { .. } => NodeKind::FunctionDecl,
        }
    }
}
