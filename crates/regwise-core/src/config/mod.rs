pub mod defaults;
mod embedding_config;
mod ingest_config;
mod observability_config;
mod ranking_config;
mod retrieval_config;

pub use embedding_config::EmbeddingConfig;
pub use ingest_config::IngestConfig;
pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingConfig;
pub use retrieval_config::RetrievalConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RegwiseError, RegwiseResult};

/// Top-level configuration, one section per subsystem.
///
/// Every section falls back to its defaults, so an empty TOML document is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegwiseConfig {
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub ranking: RankingConfig,
    pub ingest: IngestConfig,
    pub observability: ObservabilityConfig,
}

impl RegwiseConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(source: &str) -> RegwiseResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| RegwiseError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> RegwiseResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            RegwiseError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&source)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> RegwiseResult<()> {
        self.embedding.validate()?;
        self.retrieval.validate()?;
        self.ranking.validate()?;
        Ok(())
    }
}
