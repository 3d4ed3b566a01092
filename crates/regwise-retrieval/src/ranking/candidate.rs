use std::sync::Arc;

use regwise_core::models::{KnowledgeChunk, RankedChunk};
use serde::Serialize;

/// How a candidate relates to the requested frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkMatch {
    #[default]
    None,
    /// Token-level match, used when nothing matched hard.
    Soft,
    /// Equal, containing, or a versioned variant of a requested framework.
    Hard,
}

/// One score change applied by a named stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adjustment {
    pub stage: &'static str,
    pub delta: f64,
}

/// A candidate moving through the ranking stages.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub chunk: Arc<KnowledgeChunk>,
    /// Similarity reported by the search branch that found the chunk.
    pub base_similarity: f64,
    pub score: f64,
    /// Position in the merged candidate list; the final tie-breaker.
    pub order: usize,
    pub framework_match: FrameworkMatch,
    /// Text carries vocabulary of the requested role.
    pub role_signal: bool,
    /// Domain signal words found for the detected intents.
    pub density: usize,
    pub adjustments: Vec<Adjustment>,
}

impl RankedCandidate {
    pub fn new(ranked: RankedChunk, order: usize) -> Self {
        Self {
            score: ranked.similarity,
            base_similarity: ranked.similarity,
            chunk: ranked.chunk,
            order,
            framework_match: FrameworkMatch::None,
            role_signal: false,
            density: 0,
            adjustments: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.chunk.id
    }

    /// Lowercased text, for keyword checks.
    pub fn lowered_text(&self) -> String {
        self.chunk.text.to_lowercase()
    }

    /// Add `delta` to the score and remember which stage did it.
    pub fn adjust(&mut self, stage: &'static str, delta: f64) {
        if delta != 0.0 {
            self.score += delta;
            self.adjustments.push(Adjustment { stage, delta });
        }
    }

    /// Sum of adjustments made by `stage`.
    pub fn adjustment_from(&self, stage: &str) -> f64 {
        self.adjustments
            .iter()
            .filter(|a| a.stage == stage)
            .map(|a| a.delta)
            .sum()
    }

    pub fn to_ranked_chunk(&self) -> RankedChunk {
        RankedChunk::new(Arc::clone(&self.chunk), self.score)
    }
}
