//! JSON helpers for handing hypotheses and results between stages.

use std::path::Path;

use ::serde::Deserialize;

use crate::errors::{ErrorInfo, LilithError};

fn serde_error(code: &str, err: impl ToString) -> LilithError {
    LilithError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Decodes a value from JSON bytes.
pub fn from_json_slice<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, LilithError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-read", err))
}

/// Reads and decodes a JSON file, e.g. a hypothesis handed over by the fit stage.
pub fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, LilithError> {
    let bytes = std::fs::read(path).map_err(|err| {
        LilithError::Serde(
            ErrorInfo::new("json-open", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_json_slice(&bytes)
}
