use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{RegwiseError, RegwiseResult};

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Primary provider: "lexicon" or "tfidf".
    pub provider: String,
    /// Dimensionality of every stored embedding.
    pub dimensions: usize,
    /// Max entries in the in-memory embedding cache.
    pub l1_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
        }
    }
}

impl EmbeddingConfig {
    pub(crate) fn validate(&self) -> RegwiseResult<()> {
        if self.dimensions == 0 {
            return Err(RegwiseError::ConfigError(
                "embedding.dimensions must be positive".to_string(),
            ));
        }
        match self.provider.as_str() {
            "lexicon" | "tfidf" => Ok(()),
            other => Err(RegwiseError::ConfigError(format!(
                "unknown embedding provider: {other}"
            ))),
        }
    }
}
