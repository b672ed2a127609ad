use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Corpus ingestion failed: {0}")]
    Ingestion(String),

    #[error("Embedding service failed: {0}")]
    EmbeddingService(String),

    #[error("Query dimension {got} does not match index dimension {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Persisted index is incompatible with the active embedding model: {0}")]
    IncompatibleIndex(String),

    #[error("Language model call failed: {0}")]
    Synthesis(String),

    #[error("No index has been built yet")]
    NoIndex,

    #[error("Failed to persist {0}")]
    Persist(String),
}

pub type Result<T> = std::result::Result<T, Error>;
