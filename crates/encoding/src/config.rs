// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Encoder Configuration
//!
//! The operator name table and the set-operation restriction are data, not
//! code, so they can be extended without touching the encoder.
//!
//! ## Example
//!
//! ```rust
//! use qcert_sqlpp::OperatorType;
//! use qcert_sqlpp_encoding::EncoderConfig;
//!
//! let config = EncoderConfig::default()
//!     .with_operator(OperatorType::Lt, "less_than")
//!     .with_max_depth(64);
//! assert_eq!(config.operator_names.get(OperatorType::Lt), Some("less_than"));
//! assert_eq!(config.operator_names.get(OperatorType::Gt), Some("greater_than"));
//! ```
//!
//! The same configuration as YAML:
//!
//! ```yaml
//! operator_names:
//!   gt: greater_than
//!   eq: equal
//!   lt: less_than
//! max_set_operation_rights: 1
//! max_depth: 64
//! ```
//!
//! A supplied `operator_names` table replaces the default one.

use std::collections::BTreeMap;

use qcert_sqlpp::OperatorType;
use serde::{Deserialize, Serialize};

/// Default nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Errors raised while loading an [`EncoderConfig`]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum ConfigError {
    #[error("Invalid YAML configuration: {message}")]
    Yaml { message: String },

    #[error("Invalid JSON configuration: {message}")]
    Json { message: String },
}

/// Operator to S-expression name table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorNames(BTreeMap<OperatorType, String>);

impl OperatorNames {
    /// Table with no entries
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace an entry
    pub fn with(mut self, op: OperatorType, name: impl Into<String>) -> Self {
        self.0.insert(op, name.into());
        self
    }

    pub fn get(&self, op: OperatorType) -> Option<&str> {
        self.0.get(&op).map(String::as_str)
    }

    pub fn contains(&self, op: OperatorType) -> bool {
        self.0.contains_key(&op)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OperatorType, &str)> {
        self.0.iter().map(|(op, name)| (*op, name.as_str()))
    }
}

impl Default for OperatorNames {
    fn default() -> Self {
        Self::empty()
            .with(OperatorType::Gt, "greater_than")
            .with(OperatorType::Eq, "equal")
    }
}

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Names of the supported binary operators
    pub operator_names: OperatorNames,

    /// Maximum number of right inputs in a set operation
    pub max_set_operation_rights: usize,

    /// Maximum nesting depth
    pub max_depth: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            operator_names: OperatorNames::default(),
            max_set_operation_rights: 1,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncoderConfig {
    pub fn with_operator(mut self, op: OperatorType, name: impl Into<String>) -> Self {
        self.operator_names = self.operator_names.with(op, name);
        self
    }

    pub fn with_operator_names(mut self, names: OperatorNames) -> Self {
        self.operator_names = names;
        self
    }

    pub fn with_max_set_operation_rights(mut self, max: usize) -> Self {
        self.max_set_operation_rights = max;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(source).map_err(|e| ConfigError::Yaml {
            message: e.to_string(),
        })
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|e| ConfigError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_operator_table() {
        let names = OperatorNames::default();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get(OperatorType::Gt), Some("greater_than"));
        assert_eq!(names.get(OperatorType::Eq), Some("equal"));
        assert_eq!(names.get(OperatorType::Lt), None);
    }

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.max_set_operation_rights, 1);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
operator_names:
  lt: less_than
  neq: not_equal
max_depth: 16
"#;
        let config = EncoderConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.operator_names.get(OperatorType::Lt), Some("less_than"));
        assert_eq!(config.operator_names.get(OperatorType::Neq), Some("not_equal"));
        assert!(!config.operator_names.contains(OperatorType::Gt));
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.max_set_operation_rights, 1);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EncoderConfig::from_json_str(r#"{"max_set_operation_rights": 3}"#).unwrap();
        assert_eq!(config.max_set_operation_rights, 3);
        assert_eq!(config.operator_names, OperatorNames::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = EncoderConfig::from_json_str(r#"{"operator_names": {"spaceship": "cmp"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));

        let err = EncoderConfig::from_yaml_str("max_depth: [1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EncoderConfig::default().with_operator(OperatorType::Le, "less_or_equal");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"le\":\"less_or_equal\""));
        assert_eq!(EncoderConfig::from_json_str(&json).unwrap(), config);
    }
}
