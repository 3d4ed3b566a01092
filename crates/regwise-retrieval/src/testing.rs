//! Shared unit-test doubles.

use std::sync::Arc;

use regwise_core::errors::{EmbeddingError, RegwiseResult};
use regwise_core::models::{ChunkMetadata, ChunkType, KnowledgeChunk, RankedChunk};
use regwise_core::traits::IEmbeddingProvider;

/// Two-dimensional embedder: x counts "alpha", y counts "beta".
pub(crate) struct AxisEmbedder;

impl IEmbeddingProvider for AxisEmbedder {
    fn embed(&self, text: &str) -> RegwiseResult<Vec<f32>> {
        let lower = text.to_lowercase();
        Ok(vec![
            lower.matches("alpha").count() as f32,
            lower.matches("beta").count() as f32,
        ])
    }

    fn embed_batch(&self, texts: &[String]) -> RegwiseResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "axis"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Embedder whose every call fails.
pub(crate) struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> RegwiseResult<Vec<f32>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "offline".to_string(),
        }
        .into())
    }

    fn embed_batch(&self, _texts: &[String]) -> RegwiseResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::InferenceFailed {
            reason: "offline".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        false
    }
}

pub(crate) fn chunk(id: &str, framework: Option<&str>, roles: &[&str], text: &str) -> KnowledgeChunk {
    KnowledgeChunk::new(
        id,
        text,
        ChunkType::Description,
        ChunkMetadata {
            framework: framework.map(str::to_string),
            target_roles: (!roles.is_empty()).then(|| roles.iter().map(|r| r.to_string()).collect()),
            ..Default::default()
        },
    )
}

pub(crate) fn ranked(id: &str, framework: Option<&str>, roles: &[&str], text: &str, similarity: f64) -> RankedChunk {
    RankedChunk::new(Arc::new(chunk(id, framework, roles, text)), similarity)
}
