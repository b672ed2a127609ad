#![deny(warnings)]
#![deny(unused_imports)]

pub mod hashing;
pub mod ollama;
pub mod wire;

pub use hashing::HashingEmbedder;
pub use ollama::OllamaClient;

use ragchat_core::traits::EmbeddingProvider;

/// Build the embedding provider for the configured Ollama endpoint.
///
/// Respects `APP_USE_FAKE_EMBEDDINGS=1` to switch to the deterministic
/// hashing embedder for fast offline runs and tests.
pub fn default_embedding_provider(base_url: &str, model: &str) -> Box<dyn EmbeddingProvider> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!("using deterministic hashing embedder");
        return Box::new(HashingEmbedder::new(256));
    }
    Box::new(OllamaClient::new(base_url, model))
}
