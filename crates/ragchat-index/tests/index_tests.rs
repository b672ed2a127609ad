use std::fs;

use ragchat_core::error::Error;
use ragchat_core::traits::EmbeddingProvider;
use ragchat_core::types::DocumentChunk;
use ragchat_index::{status, VectorIndex};
use ragchat_providers::HashingEmbedder;
use tempfile::TempDir;

fn chunk(doc_id: &str, index: usize, content: &str) -> DocumentChunk {
    DocumentChunk {
        id: format!("{doc_id}:{index}"),
        doc_id: doc_id.to_string(),
        doc_path: format!("/corpus/{doc_id}"),
        content: content.to_string(),
        offset: 0,
        chunk_index: index,
        total_chunks: 1,
    }
}

fn sample_chunks() -> Vec<DocumentChunk> {
    vec![
        chunk("capitals.txt", 0, "Paris is the capital of France."),
        chunk("capitals.txt", 1, "Berlin is the capital of Germany."),
        chunk("plants.txt", 0, "Photosynthesis converts sunlight into energy."),
    ]
}

#[tokio::test]
async fn query_returns_the_best_match_first() {
    let embedder = HashingEmbedder::new(256);
    let index = VectorIndex::build(sample_chunks(), &embedder).await.unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.document_count(), 2);
    assert_eq!(index.dim(), 256);

    let question = vec!["What is the capital of France?".to_string()];
    let query = embedder.embed_batch(&question).await.unwrap().remove(0);
    let results = index.query(&query, 3).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results[0].chunk.content.contains("Paris"));
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn query_truncates_to_k() {
    let embedder = HashingEmbedder::new(64);
    let index = VectorIndex::build(sample_chunks(), &embedder).await.unwrap();
    let query = embedder
        .embed_batch(&["capital".to_string()])
        .await
        .unwrap()
        .remove(0);
    let results = index.query(&query, 2).unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn empty_index_answers_with_an_empty_result() {
    let embedder = HashingEmbedder::new(64);
    let index = VectorIndex::build(Vec::new(), &embedder).await.unwrap();
    assert!(index.is_empty());
    let results = index.query(&[0.5; 64], 5).unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn wrong_query_dimension_is_rejected() {
    let embedder = HashingEmbedder::new(64);
    let index = VectorIndex::build(sample_chunks(), &embedder).await.unwrap();
    let err = index.query(&[0.5; 32], 5).unwrap_err();
    match err {
        Error::DimensionMismatch { expected, got } => {
            assert_eq!(expected, 64);
            assert_eq!(got, 32);
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn save_then_load_answers_identically() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data").join("index.json");
    let embedder = HashingEmbedder::new(128);
    let index = VectorIndex::build(sample_chunks(), &embedder).await.unwrap();
    index.save(&path).unwrap();

    let restored = VectorIndex::load(&path, embedder.model_id()).unwrap();
    assert_eq!(restored.len(), index.len());
    assert_eq!(restored.dim(), index.dim());
    assert_eq!(restored.model_id(), embedder.model_id());

    let query = embedder
        .embed_batch(&["capital of France".to_string()])
        .await
        .unwrap()
        .remove(0);
    let before = index.query(&query, 3).unwrap();
    let after = restored.query(&query, 3).unwrap();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.chunk.id, b.chunk.id);
        assert!((a.score - b.score).abs() < 1e-6);
    }
}

#[tokio::test]
async fn loading_under_a_different_model_is_incompatible() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("index.json");
    let embedder = HashingEmbedder::new(128);
    let index = VectorIndex::build(sample_chunks(), &embedder).await.unwrap();
    index.save(&path).unwrap();

    let err = VectorIndex::load(&path, "ollama:some-other-model").unwrap_err();
    assert!(matches!(err, Error::IncompatibleIndex(_)));
}

#[test]
fn loading_a_corrupt_artifact_is_incompatible() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("index.json");
    fs::write(&path, "definitely not json").unwrap();
    let err = VectorIndex::load(&path, "hashing:d128").unwrap_err();
    assert!(matches!(err, Error::IncompatibleIndex(_)));
}

#[test]
fn status_round_trip_and_missing_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("status.json");

    assert!(status::read_status(&path).unwrap().is_none());

    let written = status::write_status(&path, 4, 17).unwrap();
    let read = status::read_status(&path).unwrap().expect("status exists");
    assert_eq!(read, written);
    assert_eq!(read.documents, 4);
    assert_eq!(read.chunks, 17);
}
