mod embedding_error;
mod ingest_error;
mod retrieval_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use ingest_error::IngestError;
pub use retrieval_error::RetrievalError;
pub use store_error::StoreError;

/// Top-level error type for the regwise engine.
#[derive(Debug, thiserror::Error)]
pub enum RegwiseError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("ingest error: {0}")]
    IngestError(#[from] IngestError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type RegwiseResult<T> = Result<T, RegwiseError>;

impl RegwiseError {
    /// Whether this error was caused by a colliding chunk id.
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Self::StoreError(StoreError::DuplicateChunkId { .. }))
    }
}
