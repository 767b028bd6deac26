//! Error types.
//!
//! Validation failures are never errors: they come back as
//! [`ValidationOutcome`](crate::ValidationOutcome) data. The types here cover
//! the things that can go wrong around a validation run: a rule parameter
//! that cannot be parsed, a configuration that cannot be loaded, a form
//! document that cannot be read.

use crate::rules::RuleName;
use std::path::PathBuf;
use thiserror::Error;

/// A rule parameter could not be turned into a typed rule.
///
/// The engine never surfaces this to the caller; the affected rule fails
/// closed and the problem is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{rule}` expects {expected}, got `{value}`")]
    Invalid {
        rule: RuleName,
        expected: &'static str,
        value: String,
    },
}

impl ParamError {
    pub(crate) fn invalid(rule: RuleName, expected: &'static str, value: impl Into<String>) -> Self {
        ParamError::Invalid {
            rule,
            expected,
            value: value.into(),
        }
    }
}

/// Engine configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// A form document could not be read.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read form document `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form document: {0}")]
    Json(#[from] serde_json::Error),
}
