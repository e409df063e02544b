// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # CAMP Pattern Calculus and Rule Compiler
//!
//! This crate provides the target representation shared by the query
//! front-ends, and the compiler from the rule macro language into it.
//!
//! - [`pattern`]: the CAMP pattern AST and its canonical rendering
//! - [`macros`]: named pattern rewrites (`iterate_globally`, `singleton`, `flatten`)
//! - [`rule`]: rule templates, applied rules and the kind -> expansion-law table
//! - [`sexp`]: the S-expression buffer also used by the SQL++ encoder
//!
//! ## Example
//!
//! ```rust
//! use qcert_camp::macros::{bind, lookup};
//! use qcert_camp::{Rule, RuleTemplate};
//!
//! let template = RuleTemplate::global(bind("x"));
//! let rule = template.apply_to(Rule::returning(lookup("x")));
//! let pattern = rule.convert_to_pattern().unwrap();
//! assert!(pattern.to_string().starts_with("(punop (OpFlatten ) (punop (OpBag )"));
//! ```

pub mod data;
pub mod error;
pub mod macros;
pub mod ops;
pub mod pattern;
pub mod rule;
pub mod sexp;

pub use data::Data;
pub use error::{CampError, CampResult};
pub use ops::{BinaryOperator, UnaryOperator};
pub use pattern::Pattern;
pub use rule::{AppliedRule, ExpansionLaw, Rule, RuleKind, RuleTemplate};
pub use sexp::{SExprWriter, WriteSExpr};
