//! Structured error types shared across Lilith crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable code attached to every missing-key validation failure.
pub const MISSING_KEY_CODE: &str = "lilith.missing_key";

/// Structured payload attached to the non-I/O [`LilithError`] variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (key names, entry indices, etc.).
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

/// Failure to create or write an output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoFailure {
    /// Target path as supplied by the caller.
    pub path: String,
    /// Raw OS error number, when the platform reported one.
    pub code: Option<i32>,
    /// Description of the underlying error.
    pub message: String,
}

impl IoFailure {
    /// Captures an [`std::io::Error`] raised while writing `path`.
    pub fn from_io(path: &Path, err: &std::io::Error) -> Self {
        Self {
            path: path.display().to_string(),
            code: err.raw_os_error(),
            message: err.to_string(),
        }
    }
}

impl Display for IoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "I/O error({code}): ")?,
            None => write!(f, "I/O error: ")?,
        }
        write!(
            f,
            "{}; cannot write in the output file \"{}\".",
            self.message, self.path
        )
    }
}

/// Canonical error type for the Lilith output layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LilithError {
    /// A required key or field is absent or out of range.
    #[error("validation error: {0}")]
    Validation(ErrorInfo),
    /// The output file could not be created or written.
    #[error("{0}")]
    Io(IoFailure),
    /// Input or configuration decoding errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Statistical helper errors.
    #[error("stats error: {0}")]
    Stats(ErrorInfo),
}

impl LilithError {
    /// Builds the validation error raised when `key` is absent from `section`.
    pub fn missing_key(section: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        LilithError::Validation(
            ErrorInfo::new(
                MISSING_KEY_CODE,
                format!("information is missing in {section}: '{key}' key is missing"),
            )
            .with_context("key", key)
            .with_context("section", section),
        )
    }

    /// Builds a validation error with an arbitrary code.
    pub fn validation(code: &str, message: impl Into<String>) -> Self {
        LilithError::Validation(ErrorInfo::new(code, message))
    }

    /// Wraps an I/O error raised while writing `path`.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        LilithError::Io(IoFailure::from_io(path, err))
    }

    /// Returns the structured payload for non-I/O errors.
    pub fn info(&self) -> Option<&ErrorInfo> {
        match self {
            LilithError::Validation(info) | LilithError::Serde(info) | LilithError::Stats(info) => {
                Some(info)
            }
            LilithError::Io(_) => None,
        }
    }

    /// Name of the missing key, if this is a missing-key validation error.
    pub fn missing_key_name(&self) -> Option<&str> {
        match self {
            LilithError::Validation(info) if info.code == MISSING_KEY_CODE => {
                info.context.get("key").map(String::as_str)
            }
            _ => None,
        }
    }

    /// Attaches the index of the offending entry to a validation payload.
    pub fn at_entry(self, index: usize) -> Self {
        match self {
            LilithError::Validation(info) => {
                LilithError::Validation(info.with_context("entry", index.to_string()))
            }
            other => other,
        }
    }
}
