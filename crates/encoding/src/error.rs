// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the encoding layer

use qcert_sqlpp::NodeKind;
use serde::Serialize;

/// Result type alias for encoding operations
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors that abort an encode call
///
/// Encoding is all-or-nothing: the first error ends the call and no partial
/// output is returned.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum EncodingError {
    /// No encoding is defined for this node kind, operator or literal type
    #[error("Unsupported {kind}: {detail}")]
    Unsupported { kind: NodeKind, detail: String },

    /// The node's shape is outside the supported arity or cardinality
    #[error("Malformed {kind}: {detail}")]
    Malformed { kind: NodeKind, detail: String },

    /// Nesting exceeded the configured depth
    #[error("Recursion limit exceeded (depth: {depth}, limit: {limit})")]
    RecursionLimitExceeded { depth: usize, limit: usize },
}

impl EncodingError {
    pub fn unsupported(kind: NodeKind, detail: impl Into<String>) -> Self {
        EncodingError::Unsupported {
            kind,
            detail: detail.into(),
        }
    }

    pub fn malformed(kind: NodeKind, detail: impl Into<String>) -> Self {
        EncodingError::Malformed {
            kind,
            detail: detail.into(),
        }
    }

    /// Node kind the error refers to, if any
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            EncodingError::Unsupported { kind, .. } | EncodingError::Malformed { kind, .. } => {
                Some(*kind)
            }
            EncodingError::RecursionLimitExceeded { .. } => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EncodingError::Unsupported { .. } => ErrorCategory::UnsupportedConstruct,
            EncodingError::Malformed { .. } => ErrorCategory::MalformedStructure,
            EncodingError::RecursionLimitExceeded { .. } => ErrorCategory::MalformedStructure,
        }
    }
}

/// Broad classification of encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCategory {
    /// A construct with no defined encoding
    UnsupportedConstruct,
    /// A construct whose shape is invalid for encoding
    MalformedStructure,
}
