//! Index persistence: one JSON artifact carrying the vectors, the chunk
//! payloads, and an embedding-model fingerprint that is checked on load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ragchat_core::error::{Error, Result};

use crate::index::{IndexEntry, VectorIndex, METRIC_COSINE};

/// Bumped whenever the artifact layout changes.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    format_version: u32,
    model_id: String,
    dim: usize,
    metric: String,
    fingerprint: String,
    entries: Vec<IndexEntry>,
}

/// Digest over everything that determines score compatibility. Two indexes
/// with the same fingerprint answer a given query vector identically.
fn fingerprint(model_id: &str, dim: usize, metric: &str) -> String {
    blake3::hash(format!("{model_id}:{dim}:{metric}").as_bytes())
        .to_hex()
        .to_string()
}

impl VectorIndex {
    /// Serialize to `path`. The artifact is written to a sibling temp file
    /// first and renamed into place, so an interrupted save never clobbers a
    /// readable index.
    pub fn save(&self, path: &Path) -> Result<()> {
        let state = PersistedIndex {
            format_version: FORMAT_VERSION,
            model_id: self.model_id().to_string(),
            dim: self.dim(),
            metric: METRIC_COSINE.to_string(),
            fingerprint: fingerprint(self.model_id(), self.dim(), METRIC_COSINE),
            entries: self.entries().to_vec(),
        };
        let data = serde_json::to_vec(&state)
            .map_err(|e| Error::Persist(format!("index serialization: {e}")))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Persist(format!("dir {}: {e}", parent.display())))?;
            }
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data)
            .map_err(|e| Error::Persist(format!("index to {}: {e}", tmp.display())))?;
        fs::rename(&tmp, path)
            .map_err(|e| Error::Persist(format!("index to {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), chunks = self.len(), "index saved");
        Ok(())
    }

    /// Restore from `path`, refusing artifacts written under a different
    /// format version, metric, or embedding model than `expected_model_id`.
    /// An incompatible artifact forces an explicit rebuild instead of
    /// silently producing garbage similarity scores.
    pub fn load(path: &Path, expected_model_id: &str) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| Error::Persist(format!("index from {}: {e}", path.display())))?;
        let state: PersistedIndex = serde_json::from_str(&data).map_err(|e| {
            Error::IncompatibleIndex(format!("malformed artifact {}: {e}", path.display()))
        })?;

        if state.format_version != FORMAT_VERSION {
            return Err(Error::IncompatibleIndex(format!(
                "format version {} (expected {FORMAT_VERSION})",
                state.format_version
            )));
        }
        if state.metric != METRIC_COSINE {
            return Err(Error::IncompatibleIndex(format!(
                "metric {} (expected {METRIC_COSINE})",
                state.metric
            )));
        }
        if state.fingerprint != fingerprint(&state.model_id, state.dim, &state.metric) {
            return Err(Error::IncompatibleIndex(
                "fingerprint does not match artifact metadata".to_string(),
            ));
        }
        if state.model_id != expected_model_id {
            return Err(Error::IncompatibleIndex(format!(
                "built with model {}, active model is {expected_model_id}",
                state.model_id
            )));
        }
        if state.entries.iter().any(|e| e.vector.len() != state.dim) {
            return Err(Error::IncompatibleIndex(
                "entry vector dimension differs from artifact dimension".to_string(),
            ));
        }
        Ok(VectorIndex::assemble(state.dim, state.model_id, state.entries))
    }
}
