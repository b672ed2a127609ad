//! Request/response bodies for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

/// `POST /api/embeddings` request.
#[derive(Debug, Serialize)]
pub struct EmbeddingsRequest {
    pub model: String,
    pub prompt: String,
}

/// `POST /api/embeddings` response.
#[derive(Debug, Deserialize)]
pub struct EmbeddingsResponse {
    pub embedding: Vec<f32>,
}

/// `POST /api/generate` request.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always false here; the whole completion arrives in one body.
    pub stream: bool,
}

/// `POST /api/generate` response.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    /// Generated text content.
    pub response: String,
    /// Whether generation is complete.
    #[serde(default)]
    pub done: bool,
}
