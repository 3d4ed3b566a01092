//! EmbeddingEngine: the entry point for regwise-embeddings.
//!
//! Coordinates provider selection, the fallback chain and the L1 cache,
//! and validates output dimensions. Implements `IEmbeddingProvider`.

use regwise_core::config::EmbeddingConfig;
use regwise_core::errors::{EmbeddingError, RegwiseResult};
use regwise_core::models::DegradationEvent;
use regwise_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::{content_hash, L1MemoryCache};
use crate::degradation::DegradationChain;
use crate::providers;

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: L1MemoryCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Primary provider from config, TF-IDF as last resort.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let primary = providers::create_provider(config);
        let fallback = Box::new(providers::TfIdfFallback::new(config.dimensions));
        Self::with_providers(config, vec![primary, fallback])
    }

    /// Build an engine over an explicit provider chain.
    pub fn with_providers(
        config: &EmbeddingConfig,
        providers: Vec<Box<dyn IEmbeddingProvider>>,
    ) -> Self {
        let mut chain = DegradationChain::new();
        for p in providers {
            chain.push(p);
        }

        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );

        Self {
            chain,
            cache: L1MemoryCache::new(config.l1_cache_size),
            dimensions: config.dimensions,
        }
    }

    fn validate(&self, embedding: &[f32]) -> RegwiseResult<()> {
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Embed with cache lookup and write-through.
    pub fn embed_cached(&self, text: &str) -> RegwiseResult<Vec<f32>> {
        let hash = content_hash(text);
        if let Some(vec) = self.cache.get(&hash) {
            debug!(hash = %hash, "embedding cache hit");
            return Ok(vec);
        }

        let (embedding, provider) = self.chain.embed(text)?;
        self.validate(&embedding)?;
        debug!(provider, chars = text.len(), "embedded text");
        self.cache.insert(hash, embedding.clone());
        Ok(embedding)
    }

    pub fn drain_degradation_events(&self) -> RegwiseResult<Vec<DegradationEvent>> {
        self.chain.drain_events()
    }

    pub fn degradation_count(&self) -> usize {
        self.chain.event_count()
    }

    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> RegwiseResult<Vec<f32>> {
        self.embed_cached(text)
    }

    fn embed_batch(&self, texts: &[String]) -> RegwiseResult<Vec<Vec<f32>>> {
        let (vecs, _) = self.chain.embed_batch(texts)?;
        for (text, vec) in texts.iter().zip(&vecs) {
            self.validate(vec)?;
            self.cache.insert(content_hash(text), vec.clone());
        }
        Ok(vecs)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.chain.active_provider_name()
    }

    fn is_available(&self) -> bool {
        !self.chain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regwise_core::errors::RegwiseError;

    fn config(dims: usize) -> EmbeddingConfig {
        EmbeddingConfig {
            dimensions: dims,
            ..Default::default()
        }
    }

    struct WrongDims;
    impl IEmbeddingProvider for WrongDims {
        fn embed(&self, _text: &str) -> RegwiseResult<Vec<f32>> {
            Ok(vec![1.0; 3])
        }
        fn embed_batch(&self, texts: &[String]) -> RegwiseResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0; 3]).collect())
        }
        fn dimensions(&self) -> usize {
            3
        }
        fn name(&self) -> &str {
            "wrong-dims"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn default_engine_uses_lexicon() {
        let engine = EmbeddingEngine::new(&config(384));
        assert_eq!(engine.active_provider(), "regulatory-lexicon");
        assert_eq!(engine.embed("encryption at rest").unwrap().len(), 384);
    }

    #[test]
    fn tfidf_provider_selectable() {
        let cfg = EmbeddingConfig {
            provider: "tfidf".to_string(),
            ..config(64)
        };
        let engine = EmbeddingEngine::new(&cfg);
        assert_eq!(engine.active_provider(), "tfidf-fallback");
    }

    #[test]
    fn cached_result_matches_fresh() {
        let engine = EmbeddingEngine::new(&config(128));
        let first = engine.embed("vendor exit strategy").unwrap();
        let second = engine.embed("vendor exit strategy").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let engine = EmbeddingEngine::with_providers(&config(8), vec![Box::new(WrongDims)]);
        let err = engine.embed("x").unwrap_err();
        assert!(matches!(
            err,
            RegwiseError::EmbeddingError(EmbeddingError::DimensionMismatch {
                expected: 8,
                actual: 3
            })
        ));
    }

    #[test]
    fn batch_preserves_order() {
        let engine = EmbeddingEngine::new(&config(128));
        let texts = vec!["audit evidence".to_string(), "key rotation".to_string()];
        let batch = engine.embed_batch(&texts).unwrap();
        assert_eq!(batch[0], engine.embed("audit evidence").unwrap());
        assert_eq!(batch[1], engine.embed("key rotation").unwrap());
    }
}
