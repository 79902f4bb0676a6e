//! Structured error types shared across the benchmark crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HomError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, dimensions, counts).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the benchmark.
///
/// Recoverable situations (missing sweep artifacts, export failures,
/// degenerate spreads, unknown distribution ids) are logged by the callers
/// and never surface as a `HomError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HomError {
    /// Violated input contract: mismatched dimensions, cell counts or an empty mask.
    #[error("precondition violated: {0}")]
    Precondition(ErrorInfo),
    /// Invalid geometry, plan or generator configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Filesystem failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Malformed or unserializable JSON/YAML documents.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Raster encoding and decoding failures.
    #[error("codec error: {0}")]
    Codec(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HomError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HomError::Precondition(info)
            | HomError::Config(info)
            | HomError::Io(info)
            | HomError::Serde(info)
            | HomError::Codec(info) => info,
        }
    }

    /// Shorthand for a precondition violation with the given code and message.
    pub fn precondition(code: impl Into<String>, message: impl Into<String>) -> Self {
        HomError::Precondition(ErrorInfo::new(code, message))
    }

    /// Shorthand for a configuration error with the given code and message.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        HomError::Config(ErrorInfo::new(code, message))
    }
}
