/// Errors raised while loading chunk sources.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("malformed record in {source_name} at line {line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid dataset {name}: {reason}")]
    InvalidDataset { name: String, reason: String },
}
