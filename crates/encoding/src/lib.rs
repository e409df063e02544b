// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL++ S-expression Encoding
//!
//! This crate turns a parsed SQL++ tree into the S-expression text consumed
//! by the CAMP rule pipeline.
//!
//! ## Overview
//!
//! ```text
//! SQL++ parser → SQL++ AST → Encoding → S-expression → (rule parser) → CAMP patterns
//! ```
//!
//! The encoder dispatches every node kind through one exhaustive match.
//! Kinds without an encoding fail the whole call; there is no partial
//! output and no placeholder substitution.
//!
//! ## Error Handling Strategy
//!
//! - **Unsupported**: no encoding is defined for a node kind, operator or
//!   literal type
//! - **Malformed**: the node shape is outside the supported arity, e.g. a
//!   non-binary operator expression or a set operation with too many right
//!   inputs
//! - **RecursionLimitExceeded**: the tree is nested deeper than
//!   [`EncoderConfig::max_depth`]
//!
//! ## Usage
//!
//! ```rust
//! use qcert_sqlpp::{
//!     Expr, FromClause, FromTerm, OperatorType, Projection, Query, SelectBlock, SelectClause,
//!     SelectExpression, VariableExpr,
//! };
//! use qcert_sqlpp_encoding::SqlppEncoder;
//!
//! // SELECT x FROM t AS x WHERE x > 1
//! let block = SelectBlock::new(
//!     SelectClause::regular(vec![Projection::named(Expr::var("$x"), "x")]),
//!     FromClause::new(vec![FromTerm::new(Expr::var("$t"), VariableExpr::new("$x"))]),
//! )
//! .with_where(Expr::binary(Expr::var("$x"), OperatorType::Gt, Expr::int(1)));
//! let query = Query::select(SelectExpression::from_block(block));
//!
//! let encoded = SqlppEncoder::default().encode_query(&query).unwrap();
//! assert_eq!(
//!     encoded,
//!     r#"(query (select (ref "x" ) ) (from (aliasAs "x" (table "t" ) ) ) (where (greater_than (ref "x" ) 1 ) ) )"#
//! );
//! ```

pub mod alias;
pub mod config;
pub mod context;
pub mod encoder;
pub mod error;

pub use config::{ConfigError, EncoderConfig, OperatorNames};
pub use context::EncodingContext;
pub use encoder::SqlppEncoder;
pub use error::{EncodingError, EncodingResult, ErrorCategory};
