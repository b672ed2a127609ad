//! Ollama HTTP client: embeddings and completions against a local server.
//!
//! The same client type serves both provider traits; the binary constructs
//! one instance per configured model. Calls are blocking from the caller's
//! point of view — no retries, no internal timeout — so a failure surfaces
//! immediately and the caller decides what to do.

use async_trait::async_trait;
use reqwest::Client;

use ragchat_core::error::{Error, Result};
use ragchat_core::traits::{CompletionProvider, EmbeddingProvider};

use crate::wire::{EmbeddingsRequest, EmbeddingsResponse, GenerateRequest, GenerateResponse};

pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    id: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let id = format!("ollama:{model}");
        Self {
            client: Client::new(),
            base_url,
            model: model.to_string(),
            id,
        }
    }

    /// Check whether the Ollama server answers at all.
    pub async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .is_ok()
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingsRequest {
            model: self.model.clone(),
            prompt: text.to_owned(),
        };
        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::EmbeddingService(format!("request to {url} failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::EmbeddingService(format!(
                "ollama returned {} for model {}",
                response.status(),
                self.model
            )));
        }
        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::EmbeddingService(format!("malformed embeddings response: {e}")))?;
        if parsed.embedding.is_empty() {
            return Err(Error::EmbeddingService(format!(
                "empty embedding from model {}",
                self.model
            )));
        }
        Ok(parsed.embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed_one(text).await?);
        }
        Ok(out)
    }
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_owned(),
            stream: false,
        };
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("request to {url} failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Synthesis(format!(
                "ollama returned {} for model {}",
                response.status(),
                self.model
            )));
        }
        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Synthesis(format!("malformed generate response: {e}")))?;
        tracing::debug!(model = %self.model, done = parsed.done, "completion received");
        Ok(parsed.response)
    }
}
