use async_trait::async_trait;

use crate::error::Result;

/// Text-in / vector-out embedding service.
///
/// Implementations must be deterministic for a fixed model version and must
/// return vectors of a single dimensionality for a given `model_id`; vectors
/// from different models are never mixed in one index.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `ollama:llama3.2`).
    fn model_id(&self) -> &str;

    /// Compute embeddings for a batch of input texts, one vector per text.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Prompt-in / text-out language model.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn model_id(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String>;
}
