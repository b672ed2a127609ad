//! Build-status record, persisted separately from the index so `status`
//! never has to load any vectors.

use std::fs;
use std::path::Path;

use ragchat_core::error::{Error, Result};
use ragchat_core::types::IndexStatus;

/// Write a fresh status record for a build that just completed. The previous
/// record, if any, is overwritten — there is exactly one per index.
pub fn write_status(path: &Path, documents: usize, chunks: usize) -> Result<IndexStatus> {
    let status = IndexStatus {
        documents,
        chunks,
        built_at: chrono::Utc::now(),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Persist(format!("dir {}: {e}", parent.display())))?;
        }
    }
    let data = serde_json::to_string_pretty(&status)
        .map_err(|e| Error::Persist(format!("status serialization: {e}")))?;
    fs::write(path, data)
        .map_err(|e| Error::Persist(format!("status to {}: {e}", path.display())))?;
    Ok(status)
}

/// Pure read of the last persisted record; `Ok(None)` when no build has ever
/// completed.
pub fn read_status(path: &Path) -> Result<Option<IndexStatus>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)
        .map_err(|e| Error::Persist(format!("status from {}: {e}", path.display())))?;
    let status = serde_json::from_str(&data)
        .map_err(|e| Error::Persist(format!("malformed status file {}: {e}", path.display())))?;
    Ok(Some(status))
}
