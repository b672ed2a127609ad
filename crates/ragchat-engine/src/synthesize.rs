//! Grounded answer synthesis: prompt assembly and the single model call.
//!
//! The "answer only from context" behavior is a prompt-level contract; the
//! model is a collaborator whose compliance cannot be enforced in code.
//! What this module guarantees is the prompt itself: context in retrieval
//! order, the instruction block, and the deduplicated source attribution.

use std::collections::HashSet;

use ragchat_core::error::Result;
use ragchat_core::traits::CompletionProvider;
use ragchat_core::types::ScoredChunk;

/// Verbatim reply the model is instructed to give when the retrieved context
/// does not contain the answer.
pub const NOT_FOUND_ANSWER: &str = "I cannot find anything about that in the knowledge base.";

/// A grounded answer plus the documents it was drawn from.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

/// Assemble the grounding prompt: instruction block, then every retrieved
/// chunk in retrieval order separated by blank lines, then the question.
pub fn build_prompt(question: &str, results: &[ScoredChunk]) -> String {
    let context = results
        .iter()
        .map(|r| r.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "You are a study assistant. Answer the question using ONLY the information in the context below.\n\
         Do not invent anything. Do not use any outside knowledge.\n\
         If the context does not answer the question, reply exactly: {NOT_FOUND_ANSWER}\n\n\
         Context:\n{context}\n\nQuestion: {question}"
    )
}

/// Unique source documents among the retrieved chunks, in first-seen order.
/// How many chunks each document contributed does not matter.
pub fn source_set(results: &[ScoredChunk]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for r in results {
        if seen.insert(r.chunk.doc_id.as_str()) {
            sources.push(r.chunk.doc_id.clone());
        }
    }
    sources
}

pub struct Synthesizer<'a> {
    llm: &'a dyn CompletionProvider,
}

impl<'a> Synthesizer<'a> {
    pub fn new(llm: &'a dyn CompletionProvider) -> Self {
        Self { llm }
    }

    /// One completion call per question — no retries, no caching. A provider
    /// failure surfaces as a `Synthesis` error and touches no other state.
    pub async fn synthesize(&self, question: &str, results: &[ScoredChunk]) -> Result<Answer> {
        let prompt = build_prompt(question, results);
        tracing::debug!(
            chunks = results.len(),
            prompt_chars = prompt.chars().count(),
            "invoking completion model"
        );
        let text = self.llm.complete(&prompt).await?;
        Ok(Answer {
            text: text.trim().to_string(),
            sources: source_set(results),
        })
    }
}
