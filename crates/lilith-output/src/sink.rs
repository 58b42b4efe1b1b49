use std::fs;
use std::path::{Path, PathBuf};

use lilith_core::errors::LilithError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

/// Summary of a completed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReceipt {
    /// File that was created or overwritten.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: usize,
    /// Lowercase hexadecimal SHA-256 of the written bytes.
    pub sha256: String,
}

/// Hex digest of a rendered document.
pub fn content_digest(contents: &str) -> String {
    format!("{:x}", Sha256::digest(contents.as_bytes()))
}

/// Writes a fully rendered document in a single call.
pub fn write_document(path: &Path, contents: &str) -> Result<WriteReceipt, LilithError> {
    if let Err(err) = fs::write(path, contents) {
        warn!(path = %path.display(), error = %err, "cannot write output file");
        return Err(LilithError::io(path, &err));
    }
    let receipt = WriteReceipt {
        path: path.to_path_buf(),
        bytes: contents.len(),
        sha256: content_digest(contents),
    };
    info!(
        path = %receipt.path.display(),
        bytes = receipt.bytes,
        sha256 = %receipt.sha256,
        "wrote output file"
    );
    Ok(receipt)
}
