//! Precomputed embeddings of the per-intent seed phrases.

use std::collections::HashMap;

use regwise_core::intent::QueryIntent;
use regwise_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

use crate::vocabulary;

#[derive(Debug, Clone, Default)]
pub struct SeedBank {
    seeds: HashMap<QueryIntent, Vec<Vec<f32>>>,
}

impl SeedBank {
    /// Embed every seed phrase. A phrase that fails to embed is left out.
    pub fn build(embedder: &dyn IEmbeddingProvider) -> Self {
        let mut seeds = HashMap::new();
        for intent in QueryIntent::ALL {
            let vectors: Vec<Vec<f32>> = vocabulary::seed_phrases(intent)
                .iter()
                .filter_map(|phrase| match embedder.embed(phrase) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        warn!(intent = %intent, phrase, error = %e, "seed phrase not embedded");
                        None
                    }
                })
                .collect();
            seeds.insert(intent, vectors);
        }
        debug!(provider = embedder.name(), "seed bank built");
        Self { seeds }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the seeds for one intent.
    pub fn with_seeds(mut self, intent: QueryIntent, vectors: Vec<Vec<f32>>) -> Self {
        self.seeds.insert(intent, vectors);
        self
    }

    pub fn for_intent(&self, intent: QueryIntent) -> &[Vec<f32>] {
        self.seeds.get(&intent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.seeds.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
