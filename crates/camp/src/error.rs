// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for rule compilation

use serde::Serialize;

use crate::rule::RuleKind;

/// Result type alias for rule compilation
pub type CampResult<T> = Result<T, CampError>;

/// Errors raised while converting rules to patterns
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum CampError {
    /// The rule kind has no expansion law
    #[error("Unsupported construct: no expansion law for rule kind '{kind}'")]
    UnsupportedRuleKind { kind: RuleKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CampError::UnsupportedRuleKind {
            kind: RuleKind::When,
        };
        let msg = err.to_string();
        assert!(msg.contains("Unsupported construct"));
        assert!(msg.contains("When"));
    }

    #[test]
    fn test_error_serialization() {
        let err = CampError::UnsupportedRuleKind {
            kind: RuleKind::Not,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Not"));
    }
}
