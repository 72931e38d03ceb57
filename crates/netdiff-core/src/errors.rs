//! Structured error types shared across netdiff crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DiffusionError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node ids, keys, counts).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the diffusion engine.
///
/// Families follow the error taxonomy of the engine: `Config` errors are
/// recoverable requests (unknown model, action or layout) that callers turn
/// into logged no-ops, `Model` errors are violated rule preconditions and
/// `Conversion` errors reject graphs the threshold conversion cannot encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DiffusionError {
    /// Graph structure errors (unknown nodes, duplicate nodes).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Unknown identifiers or malformed configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Update rule precondition violations.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Threshold to automata conversion errors.
    #[error("conversion error: {0}")]
    Conversion(ErrorInfo),
    /// Randomness and distribution errors.
    #[error("rng error: {0}")]
    Rng(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
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

impl DiffusionError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DiffusionError::Graph(info)
            | DiffusionError::Config(info)
            | DiffusionError::Model(info)
            | DiffusionError::Conversion(info)
            | DiffusionError::Rng(info)
            | DiffusionError::Serde(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Returns true for configuration errors, which callers degrade to no-ops.
    pub fn is_config(&self) -> bool {
        matches!(self, DiffusionError::Config(_))
    }

    /// Appends a context entry regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            DiffusionError::Graph(info) => DiffusionError::Graph(info.with_context(key, value)),
            DiffusionError::Config(info) => DiffusionError::Config(info.with_context(key, value)),
            DiffusionError::Model(info) => DiffusionError::Model(info.with_context(key, value)),
            DiffusionError::Conversion(info) => {
                DiffusionError::Conversion(info.with_context(key, value))
            }
            DiffusionError::Rng(info) => DiffusionError::Rng(info.with_context(key, value)),
            DiffusionError::Serde(info) => DiffusionError::Serde(info.with_context(key, value)),
        }
    }
}
