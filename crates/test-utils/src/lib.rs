// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for the CAMP rule compiler and SQL++ encoder
//!
//! This crate provides common testing components including:
//! - SQL++ tree fixtures shaped like parser output
//! - An S-expression reader for structural comparison of output
//! - S-expression assertions

pub mod assertions;
pub mod fixtures;
pub mod sexpr;

// Re-exports for convenience
pub use assertions::{SExprAssertions, count_tag};
pub use fixtures::SqlppFixtures;
pub use sexpr::{ReadError, SExpr, read_sexpr};
