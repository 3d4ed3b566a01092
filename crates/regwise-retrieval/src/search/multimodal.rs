//! Three-branch search: semantic, keyword, concept.
//!
//! Branches run in parallel. A failing branch contributes nothing and is
//! logged; the others still return.

use std::time::{Duration, Instant};

use regwise_core::config::RetrievalConfig;
use regwise_core::errors::RegwiseResult;
use regwise_core::models::{BranchTimings, KeywordHit, MultiModalResult, RankedChunk};
use regwise_core::traits::{IChunkStore, IEmbeddingProvider};
use regwise_store::RequirementStore;
use tracing::{debug, warn};

use super::{concept, keyword, retain_role, SimilaritySearch};

pub struct MultiModalSearch<'a> {
    store: &'a dyn IChunkStore,
    requirements: &'a RequirementStore,
    embedder: &'a dyn IEmbeddingProvider,
    config: &'a RetrievalConfig,
}

/// Semantic branch output.
struct SemanticOutcome {
    results: Vec<RankedChunk>,
    degraded: bool,
}

impl<'a> MultiModalSearch<'a> {
    pub fn new(
        store: &'a dyn IChunkStore,
        requirements: &'a RequirementStore,
        embedder: &'a dyn IEmbeddingProvider,
        config: &'a RetrievalConfig,
    ) -> Self {
        Self {
            store,
            requirements,
            embedder,
            config,
        }
    }

    /// General search: semantic at the general threshold, relaxed to the
    /// fallback threshold when nothing passes.
    pub fn search(&self, query: &str, role: Option<&str>) -> MultiModalResult {
        self.run(query, role, self.config.general_threshold, Some(self.config.fallback_threshold))
    }

    /// Search with an explicit semantic threshold and no relaxation.
    pub fn search_with_threshold(
        &self,
        query: &str,
        role: Option<&str>,
        threshold: f64,
    ) -> MultiModalResult {
        self.run(query, role, threshold, None)
    }

    fn run(
        &self,
        query: &str,
        role: Option<&str>,
        threshold: f64,
        relaxed: Option<f64>,
    ) -> MultiModalResult {
        let start = Instant::now();
        let ((semantic, semantic_time), ((keyword, keyword_time), (concept, concept_time))) =
            rayon::join(
                || timed(|| self.semantic(query, role, threshold, relaxed)),
                || {
                    rayon::join(
                        || timed(|| self.keyword(query, role)),
                        || timed(|| self.concept(query, role)),
                    )
                },
            );

        let keyword_chunks: usize = keyword.iter().map(|hit| hit.chunks.len()).sum();
        let total_count = semantic.results.len() + keyword_chunks + concept.len();
        let result = MultiModalResult {
            semantic: semantic.results,
            keyword,
            concept,
            total_count,
            elapsed: start.elapsed(),
            timings: BranchTimings {
                semantic: semantic_time,
                keyword: keyword_time,
                concept: concept_time,
            },
            degraded: semantic.degraded,
        };
        debug!(
            semantic = result.semantic.len(),
            keyword = result.keyword.len(),
            concept = result.concept.len(),
            degraded = result.degraded,
            elapsed_us = result.elapsed.as_micros() as u64,
            "multi-modal search"
        );
        result
    }

    fn semantic(
        &self,
        query: &str,
        role: Option<&str>,
        threshold: f64,
        relaxed: Option<f64>,
    ) -> SemanticOutcome {
        let search = SimilaritySearch::new(self.store, self.embedder);
        let query_vec = match self.embedder.embed(query) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "query embedding failed, using lexical scoring");
                None
            }
        };
        let degraded = query_vec.is_none();
        let scan = |t: f64| match &query_vec {
            Some(v) => search.search_embedding(v, t),
            None => search.search_lexical(query, t),
        };

        let mut results = or_empty("semantic", scan(threshold));
        retain_role(&mut results, role);
        if results.is_empty() {
            if let Some(lower) = relaxed.filter(|l| *l < threshold) {
                debug!(threshold = lower, "semantic branch empty, relaxing threshold");
                results = or_empty("semantic", scan(lower));
                retain_role(&mut results, role);
            }
        }
        SemanticOutcome { results, degraded }
    }

    fn keyword(&self, query: &str, role: Option<&str>) -> Vec<KeywordHit> {
        or_empty("keyword", keyword::search(self.requirements, self.store, query, role))
    }

    fn concept(&self, query: &str, role: Option<&str>) -> Vec<RankedChunk> {
        or_empty(
            "concept",
            concept::search(self.store, query, role, self.config.concept_similarity),
        )
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

fn or_empty<T>(branch: &str, result: RegwiseResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(branch, error = %e, "search branch failed");
        Vec::new()
    })
}
