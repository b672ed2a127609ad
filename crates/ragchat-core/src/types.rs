//! Domain types shared by the ingestion, index, and engine crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

pub type ChunkId = String;

/// A corpus file loaded at ingestion time. Exists only between ingestion and
/// chunking; rebuilds always re-read the corpus from disk.
#[derive(Debug, Clone)]
pub struct Document {
    pub doc_id: String,
    pub path: PathBuf,
    pub text: String,
    pub modified: Option<SystemTime>,
}

/// A chunk of a source document that is independently embedded and retrieved.
///
/// - `id`: globally unique chunk identifier (`"<doc_id>:<chunk_index>"`)
/// - `doc_id`: stable document identity (file name)
/// - `doc_path`: original path to the source file
/// - `content`: the text payload of the chunk
/// - `offset`: character offset of the chunk start within the source text
/// - `chunk_index`/`total_chunks`: position within the parent document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: ChunkId,
    pub doc_id: String,
    pub doc_path: String,
    pub content: String,
    pub offset: usize,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// One retrieval hit. `score` is cosine similarity, higher is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// Metadata about the last successful index build. Persisted separately from
/// the index so it can be inspected without loading any vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatus {
    pub documents: usize,
    pub chunks: usize,
    pub built_at: DateTime<Utc>,
}
