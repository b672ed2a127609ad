//! Index lifecycle: load-or-build, explicit full rebuild, status, answer.

use ragchat_core::chunker::Chunker;
use ragchat_core::config::Settings;
use ragchat_core::error::{Error, Result};
use ragchat_core::ingest;
use ragchat_core::traits::{CompletionProvider, EmbeddingProvider};
use ragchat_core::types::IndexStatus;
use ragchat_index::{status, VectorIndex};

use crate::retriever::Retriever;
use crate::synthesize::{Answer, Synthesizer};

/// Owns the active vector index and both provider handles exclusively; the
/// retriever and synthesizer only ever borrow them per question. Everything
/// runs through `&self`/`&mut self` here, so a half-built index is never
/// observable and queries cannot race a rebuild.
pub struct RagEngine {
    settings: Settings,
    embedder: Box<dyn EmbeddingProvider>,
    llm: Box<dyn CompletionProvider>,
    index: Option<VectorIndex>,
}

impl RagEngine {
    pub fn new(
        settings: Settings,
        embedder: Box<dyn EmbeddingProvider>,
        llm: Box<dyn CompletionProvider>,
    ) -> Self {
        Self {
            settings,
            embedder,
            llm,
            index: None,
        }
    }

    pub fn is_built(&self) -> bool {
        self.index.is_some()
    }

    /// Load the persisted index if one exists, otherwise run a full build.
    ///
    /// An `IncompatibleIndex` error is returned as-is so the caller can
    /// decide to rebuild explicitly rather than having stale vectors
    /// silently replaced.
    pub async fn ensure_index(&mut self) -> Result<()> {
        if self.index.is_some() {
            return Ok(());
        }
        if self.settings.index_path.exists() {
            let index = VectorIndex::load(&self.settings.index_path, self.embedder.model_id())?;
            tracing::info!(chunks = index.len(), "existing index loaded");
            self.index = Some(index);
            return Ok(());
        }
        self.rebuild().await.map(|_| ())
    }

    /// Full rebuild: re-ingest, re-chunk, re-embed, persist the index, then
    /// the status record, then swap the new index in.
    ///
    /// On any failure the previous index — in memory and on disk — and the
    /// previous status record stay untouched; there is no partial merge and
    /// no incremental path.
    pub async fn rebuild(&mut self) -> Result<IndexStatus> {
        let documents = ingest::load_documents(&self.settings.corpus_dir)?;
        let chunker = Chunker::new(self.settings.chunk_size, self.settings.chunk_overlap);
        let mut chunks = Vec::new();
        for doc in &documents {
            chunks.extend(chunker.chunk_document(doc));
        }
        tracing::info!(
            documents = documents.len(),
            chunks = chunks.len(),
            "corpus chunked"
        );

        let index = VectorIndex::build(chunks, self.embedder.as_ref()).await?;
        index.save(&self.settings.index_path)?;
        let status = status::write_status(&self.settings.status_path, documents.len(), index.len())?;
        self.index = Some(index);
        Ok(status)
    }

    /// Pure read of the last persisted status record; `Ok(None)` when no
    /// build has ever completed. Never loads the index itself.
    pub fn status(&self) -> Result<Option<IndexStatus>> {
        status::read_status(&self.settings.status_path)
    }

    /// Retrieve the top-k chunks for `question` and synthesize a grounded,
    /// source-attributed answer. Requires a prior successful
    /// [`RagEngine::ensure_index`] or [`RagEngine::rebuild`].
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let index = self.index.as_ref().ok_or(Error::NoIndex)?;
        let retriever = Retriever::new(index, self.embedder.as_ref(), self.settings.retriever_k);
        let results = retriever.retrieve(question).await?;
        Synthesizer::new(self.llm.as_ref())
            .synthesize(question, &results)
            .await
    }
}
