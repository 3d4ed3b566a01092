//! Candidate ranking.
//!
//! A [`RankingPipeline`] runs a fixed list of [`ScoringStage`]s over the
//! merged search candidates, sorts by adjusted score, resolves near-ties,
//! then trims to the context and citation limits. Ranking is pure: the
//! same candidates and context always produce the same order.

mod candidate;
pub mod framework;
mod seeds;
pub mod stages;
mod tiebreak;

pub use candidate::{Adjustment, FrameworkMatch, RankedCandidate};
pub use seeds::SeedBank;
pub use stages::ScoringStage;
pub use tiebreak::is_role_first;

use regwise_core::config::{RankingConfig, RetrievalConfig};
use regwise_core::intent::QueryIntent;
use regwise_core::models::RankedChunk;
use regwise_observability::ranking_span;
use tracing::debug;

use crate::query::detect_intents;

/// Per-query inputs shared by every stage.
pub struct RankingContext<'a> {
    pub query: &'a str,
    pub role: Option<&'a str>,
    /// Requested frameworks, possibly empty.
    pub frameworks: &'a [String],
    pub intents: Vec<QueryIntent>,
    pub seeds: &'a SeedBank,
}

impl<'a> RankingContext<'a> {
    pub fn new(
        query: &'a str,
        role: Option<&'a str>,
        frameworks: &'a [String],
        seeds: &'a SeedBank,
    ) -> Self {
        Self {
            query,
            role: role.filter(|r| !r.trim().is_empty()),
            frameworks,
            intents: detect_intents(query),
            seeds,
        }
    }
}

/// Outcome of ranking one candidate list.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Best first, at most `max_context` entries.
    pub context: Vec<RankedCandidate>,
    /// Distinct frameworks of the context, in context order.
    pub citations: Vec<String>,
    /// Some candidate matched a requested framework exactly, so the
    /// framework filter restricted the list to hard matches.
    pub hard_filtered: bool,
    /// Candidates received before deduplication.
    pub candidate_count: usize,
}

impl Ranking {
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.context.first()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }

    pub fn context_chunks(&self) -> Vec<RankedChunk> {
        self.context.iter().map(RankedCandidate::to_ranked_chunk).collect()
    }
}

pub struct RankingPipeline {
    stages: Vec<Box<dyn ScoringStage>>,
    near_tie_epsilon: f64,
    max_context: usize,
    max_citations: usize,
}

impl RankingPipeline {
    pub fn new(ranking: &RankingConfig, retrieval: &RetrievalConfig) -> Self {
        Self {
            stages: stages::default_stages(ranking),
            near_tie_epsilon: ranking.near_tie_epsilon,
            max_context: retrieval.max_context,
            max_citations: retrieval.max_citations,
        }
    }

    /// Replace the stage list. Stages run in the given order.
    pub fn with_stages(mut self, stages: Vec<Box<dyn ScoringStage>>) -> Self {
        self.stages = stages;
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn rank(&self, candidates: Vec<RankedChunk>, ctx: &RankingContext<'_>) -> Ranking {
        let candidate_count = candidates.len();
        let _span = ranking_span!(candidate_count).entered();

        let mut list: Vec<RankedCandidate> = candidates
            .into_iter()
            .enumerate()
            .map(|(order, c)| RankedCandidate::new(c, order))
            .collect();

        for stage in &self.stages {
            list = stage.apply(list, ctx);
            debug!(stage = stage.name(), remaining = list.len(), "ranking stage applied");
        }

        let hard_filtered = list.iter().any(|c| c.framework_match == FrameworkMatch::Hard);
        tiebreak::sort_by_score(&mut list);
        tiebreak::promote_near_tie(&mut list, ctx.role, self.near_tie_epsilon);
        list.truncate(self.max_context);

        let mut citations: Vec<String> = Vec::new();
        for framework in list.iter().filter_map(|c| c.chunk.metadata.framework.as_ref()) {
            if citations.len() >= self.max_citations {
                break;
            }
            if !citations.contains(framework) {
                citations.push(framework.clone());
            }
        }

        debug!(
            candidates = candidate_count,
            context = list.len(),
            best = list.first().map(|c| c.id()).unwrap_or("-"),
            "ranking complete"
        );
        Ranking {
            context: list,
            citations,
            hard_filtered,
            candidate_count,
        }
    }
}
