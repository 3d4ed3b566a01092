//! Embedding providers and the factory that picks the primary one.

mod lexicon;
mod tfidf_fallback;

pub use lexicon::RegulatoryLexicon;
pub use tfidf_fallback::TfIdfFallback;

use regwise_core::config::EmbeddingConfig;
use regwise_core::traits::IEmbeddingProvider;
use tracing::info;

/// Build the primary provider named in config.
///
/// Unknown names are rejected by config validation, so anything that is
/// not "tfidf" gets the lexicon provider.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "tfidf" => {
            info!(dims = config.dimensions, "using TF-IDF embedding provider");
            Box::new(TfIdfFallback::new(config.dimensions))
        }
        _ => {
            info!(dims = config.dimensions, "using regulatory lexicon embedding provider");
            Box::new(RegulatoryLexicon::new(config.dimensions))
        }
    }
}
