//! Top-k retrieval over the active index.

use ragchat_core::error::{Error, Result};
use ragchat_core::traits::EmbeddingProvider;
use ragchat_core::types::ScoredChunk;
use ragchat_index::VectorIndex;

/// Borrows the engine-owned index and embedder for the duration of one
/// question. The result order is exactly the index order — no re-ranking,
/// no filtering.
pub struct Retriever<'a> {
    index: &'a VectorIndex,
    embedder: &'a dyn EmbeddingProvider,
    k: usize,
}

impl<'a> Retriever<'a> {
    pub fn new(index: &'a VectorIndex, embedder: &'a dyn EmbeddingProvider, k: usize) -> Self {
        Self { index, embedder, k }
    }

    /// Embed the question with the same provider the index was built with
    /// and return the top-k chunks by similarity.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<ScoredChunk>> {
        let mut vectors = self.embedder.embed_batch(&[question.to_owned()]).await?;
        let query = vectors.pop().ok_or_else(|| {
            Error::EmbeddingService("embedder returned no vector for the question".to_string())
        })?;
        self.index.query(&query, self.k)
    }
}
