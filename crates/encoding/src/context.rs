// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Encoding context for tracking state during one encode call

use qcert_camp::SExprWriter;
use qcert_sqlpp::NodeKind;
use tracing::trace;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{EncodingError, EncodingResult};

/// Per-call state of the SQL++ encoder
///
/// The context owns:
/// - The S-expression output buffer
/// - Recursion depth tracking
///
/// One context is created per top-level encode call and is never shared
/// between calls.
#[derive(Debug)]
pub struct EncodingContext {
    /// Output accumulated so far
    out: SExprWriter,

    /// Current nesting depth
    depth: usize,

    /// Maximum nesting depth allowed
    max_depth: usize,
}

impl EncodingContext {
    /// Create a new context with the default depth limit
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a new context with a custom depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            out: SExprWriter::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Output buffer
    pub fn out(&mut self) -> &mut SExprWriter {
        &mut self.out
    }

    /// Output written so far, including the trailing separator
    pub fn output(&self) -> &str {
        self.out.as_str()
    }

    /// Enter a node
    ///
    /// Fails with [`EncodingError::RecursionLimitExceeded`] when the new depth
    /// exceeds the limit. Every successful `enter` must be paired with
    /// [`exit`](Self::exit).
    pub fn enter(&mut self, kind: NodeKind) -> EncodingResult<()> {
        if self.depth >= self.max_depth {
            return Err(EncodingError::RecursionLimitExceeded {
                depth: self.depth + 1,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        trace!(depth = self.depth, %kind, "enter");
        Ok(())
    }

    /// Leave the innermost node
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Consume the context and return the finished S-expression
    pub fn finish(self) -> String {
        self.out.finish()
    }
}

impl Default for EncodingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let ctx = EncodingContext::new();
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.max_depth(), DEFAULT_MAX_DEPTH);
        assert!(ctx.output().is_empty());
    }

    #[test]
    fn test_depth_tracking() {
        let mut ctx = EncodingContext::with_max_depth(2);
        ctx.enter(NodeKind::Query).unwrap();
        ctx.enter(NodeKind::SelectBlock).unwrap();
        assert_eq!(ctx.depth(), 2);

        let err = ctx.enter(NodeKind::FromClause).unwrap_err();
        assert_eq!(
            err,
            EncodingError::RecursionLimitExceeded { depth: 3, limit: 2 }
        );

        ctx.exit();
        ctx.exit();
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_finish_trims_separator() {
        let mut ctx = EncodingContext::new();
        ctx.out().string_node("ref", "x");
        assert_eq!(ctx.output(), r#"(ref "x" ) "#);
        assert_eq!(ctx.finish(), r#"(ref "x" )"#);
    }
}
