//! TF-IDF hashed fallback provider.
//!
//! Generates fixed-dimension vectors from term frequencies hashed into
//! buckets. No topical features, but always available.

use std::collections::HashMap;

use regwise_core::errors::RegwiseResult;
use regwise_core::traits::IEmbeddingProvider;

use crate::tokenizer::{hash_term, l2_normalize, tokenize};

/// TF-IDF fallback embedding provider.
pub struct TfIdfFallback {
    dimensions: usize,
}

impl TfIdfFallback {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn tfidf_vector(&self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() || self.dimensions == 0 {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            // Longer terms are rarer; a cheap stand-in for corpus IDF.
            let idf = 1.0 + (term.len() as f32).ln();
            vec[hash_term(term, self.dimensions)] += (count / total) * idf;
        }

        l2_normalize(&mut vec);
        vec
    }
}

impl IEmbeddingProvider for TfIdfFallback {
    fn embed(&self, text: &str) -> RegwiseResult<Vec<f32>> {
        Ok(self.tfidf_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> RegwiseResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.tfidf_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}
