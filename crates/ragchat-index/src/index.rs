//! Flat vector index with brute-force cosine search.
//!
//! The corpus sizes this system targets (hundreds to low thousands of
//! chunks) do not justify an approximate-nearest-neighbor structure; a
//! linear scan is exact and fast enough. The metric is cosine similarity,
//! recorded in the persisted artifact so an index can never be queried
//! under a different metric than it was built with. Ties in the score keep
//! build order (stable sort).

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use ragchat_core::error::{Error, Result};
use ragchat_core::traits::EmbeddingProvider;
use ragchat_core::types::{DocumentChunk, ScoredChunk};

/// Number of chunk texts sent to the embedding provider per call.
const EMBED_BATCH: usize = 32;

/// Identifier of the one supported distance metric.
pub const METRIC_COSINE: &str = "cosine";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub vector: Vec<f32>,
    pub chunk: DocumentChunk,
}

/// An immutable collection of (vector, chunk) pairs. Owns its entries
/// exclusively; a rebuild constructs a whole new index rather than mutating
/// this one.
#[derive(Debug)]
pub struct VectorIndex {
    dim: usize,
    model_id: String,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embed every chunk through `provider` and assemble the index.
    ///
    /// Any embedding failure aborts the build; nothing partial escapes. The
    /// dimension is taken from the first returned vector and every later
    /// vector must match it.
    pub async fn build(
        chunks: Vec<DocumentChunk>,
        provider: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        let mut entries = Vec::with_capacity(chunks.len());
        let mut dim = 0usize;
        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks embedded")
                .unwrap()
                .progress_chars("#>-"),
        );
        for batch in chunks.chunks(EMBED_BATCH) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let vectors = provider.embed_batch(&texts).await?;
            if vectors.len() != texts.len() {
                return Err(Error::EmbeddingService(format!(
                    "expected {} vectors, got {}",
                    texts.len(),
                    vectors.len()
                )));
            }
            for (chunk, vector) in batch.iter().zip(vectors) {
                if dim == 0 {
                    dim = vector.len();
                }
                if vector.len() != dim {
                    return Err(Error::EmbeddingService(format!(
                        "embedding dimension changed from {dim} to {} mid-build",
                        vector.len()
                    )));
                }
                entries.push(IndexEntry {
                    vector,
                    chunk: chunk.clone(),
                });
                pb.inc(1);
            }
        }
        pb.finish_and_clear();
        tracing::info!(
            chunks = entries.len(),
            dim,
            model = provider.model_id(),
            "vector index built"
        );
        Ok(Self {
            dim,
            model_id: provider.model_id().to_string(),
            entries,
        })
    }

    pub(crate) fn assemble(dim: usize, model_id: String, entries: Vec<IndexEntry>) -> Self {
        Self {
            dim,
            model_id,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub(crate) fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Distinct source documents among the indexed chunks.
    pub fn document_count(&self) -> usize {
        let mut ids: Vec<&str> = self.entries.iter().map(|e| e.chunk.doc_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// The k nearest entries by cosine similarity, best first.
    ///
    /// An empty index answers with an empty result; a query vector of the
    /// wrong dimension is a [`Error::DimensionMismatch`].
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                got: vector.len(),
            });
        }
        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|e| ScoredChunk {
                chunk: e.chunk.clone(),
                score: cosine_similarity(vector, &e.vector),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
