// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Macro Library
//!
//! Named structural rewrites used by rule expansion. Each function only
//! assembles a new [`Pattern`]; none of them inspects or evaluates its input.

use crate::ops::UnaryOperator;
use crate::pattern::Pattern;

/// Name of the global constant holding the working-memory collection
pub const WORLD: &str = "WORLD";

/// Evaluate `pattern` against the global `WORLD` collection instead of the
/// locally bound value.
///
/// `WW p = pletIt (pgetConstant "WORLD") p`
pub fn iterate_globally(pattern: Pattern) -> Pattern {
    Pattern::let_it(Pattern::constant(WORLD), pattern)
}

/// Wrap the result of `pattern` as a one-element bag.
pub fn singleton(pattern: Pattern) -> Pattern {
    Pattern::unary(UnaryOperator::OpBag, pattern)
}

/// Flatten the (bag-of-bags) result of `pattern` by one level.
pub fn flatten(pattern: Pattern) -> Pattern {
    Pattern::unary(UnaryOperator::OpFlatten, pattern)
}

/// Look up a variable in the current environment.
pub fn lookup(name: impl Into<String>) -> Pattern {
    Pattern::unary(UnaryOperator::OpDot(name.into()), Pattern::Env)
}

/// Bind the current value to `name`, producing a one-field environment record.
pub fn bind(name: impl Into<String>) -> Pattern {
    Pattern::unary(UnaryOperator::OpRec(name.into()), Pattern::It)
}
