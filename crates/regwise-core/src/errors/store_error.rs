/// Chunk store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate chunk id: {id}")]
    DuplicateChunkId { id: String },

    #[error("chunk {id} has confidence {value} outside [0, 1]")]
    InvalidConfidence { id: String, value: f64 },

    #[error("chunk id must not be empty")]
    EmptyChunkId,

    #[error("index corruption detected: {details}")]
    IndexCorruption { details: String },

    #[error("store lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}
