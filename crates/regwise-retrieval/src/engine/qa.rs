//! Question answering, role-specific search and role guidance.

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use regwise_core::errors::RegwiseResult;
use regwise_core::models::{QaRequest, QaResponse, RankedChunk, RoleGuidance, RoleSpecificResult};
use regwise_core::traits::IChunkStore;
use regwise_observability::tracing_setup::events;
use regwise_observability::{retrieval_span, QueryLogEntry};
use tracing::{debug, warn};

use super::{Knowledge, KnowledgeEngine};
use crate::query::{detect_frameworks, detect_intents};
use crate::ranking::framework::matches_any_hard;
use crate::ranking::{Ranking, RankingContext};
use crate::search::SimilaritySearch;
use crate::synthesis::{AnswerRequest, AnswerSynthesizer};

/// Candidates split by the role filter.
struct RoleCandidates {
    /// What ranking sees: role matches, or everything when none matched.
    candidates: Vec<RankedChunk>,
    /// Distinct ids that passed the role filter.
    matches: usize,
}

/// Trimmed framework hints with blank entries removed.
fn requested_frameworks(frameworks: &[String]) -> Vec<String> {
    frameworks
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_by_role(all: Vec<RankedChunk>, role: &str) -> RoleCandidates {
    let filtered: Vec<RankedChunk> = all
        .iter()
        .filter(|c| c.chunk.matches_role(role))
        .cloned()
        .collect();
    let matches = filtered
        .iter()
        .map(|c| c.chunk.id.as_str())
        .collect::<HashSet<_>>()
        .len();
    if filtered.is_empty() {
        debug!(role, "no candidates for role, using unfiltered set");
        RoleCandidates { candidates: all, matches }
    } else {
        RoleCandidates { candidates: filtered, matches }
    }
}

impl KnowledgeEngine {
    /// Answer a question with citations. Never fails for lack of results:
    /// an empty search yields the low-confidence fallback answer.
    pub async fn answer_question(&self, request: QaRequest) -> RegwiseResult<QaResponse> {
        let started = Instant::now();
        let k = self.knowledge().await?;
        let question = request.question.trim();
        let role = request.role.as_deref().map(str::trim).filter(|r| !r.is_empty());
        let _span = retrieval_span!(question, role).entered();

        let requested = requested_frameworks(&request.frameworks);
        let frameworks = if requested.is_empty() {
            detect_frameworks(question)
        } else {
            requested
        };
        let intents = detect_intents(question);

        let search = self.multimodal(&k);
        let (candidates, role_matches) = match role {
            Some(role) => {
                let all = search
                    .search_with_threshold(question, None, self.config.retrieval.role_threshold)
                    .candidates();
                let split = split_by_role(all, role);
                (split.candidates, split.matches)
            }
            None => (search.search(question, None).candidates(), 0),
        };

        let ctx = RankingContext::new(question, role, &frameworks, &k.seeds);
        let ranking = self.pipeline.rank(candidates, &ctx);
        let synthesizer = AnswerSynthesizer::new(&self.config.retrieval, &k.samples, &k.registry);
        let response = synthesizer.synthesize(
            &AnswerRequest {
                question,
                role,
                frameworks: &frameworks,
                role_matches,
                intents: &intents,
            },
            &ranking,
        );

        events::answer_produced(
            response.best_match_id.as_deref(),
            response.confidence,
            response.citations.len(),
        );
        let mut entry = QueryLogEntry::new(question, started.elapsed(), ranking.candidate_count);
        entry.role = role.map(str::to_string);
        entry.frameworks = frameworks;
        entry.intents = intents;
        entry.best_match_id = response.best_match_id.clone();
        entry.confidence = response.confidence;
        self.record_query(entry);

        Ok(response)
    }

    /// Low-threshold semantic search for one role, optionally restricted to
    /// a framework, then ranked.
    pub async fn search_role_specific(
        &self,
        query: &str,
        role: &str,
        framework: Option<&str>,
    ) -> RegwiseResult<RoleSpecificResult> {
        let k = self.knowledge().await?;
        let framework = framework.map(str::trim).filter(|f| !f.is_empty());
        let _span = retrieval_span!(query, Some(role)).entered();
        let threshold = self.config.retrieval.role_threshold;

        let similarity = SimilaritySearch::new(&k.store, &k.embedder);
        let unfiltered = similarity.search(query, threshold).or_else(|e| {
            warn!(error = %e, "query embedding failed, using lexical scoring");
            similarity.search_lexical(query, threshold)
        })?;

        let frameworks: Vec<String> = framework.map(str::to_string).into_iter().collect();
        let split = split_by_role(unfiltered.clone(), role);
        let ranking = self.rank_for(&k, query, Some(role), &frameworks, split.candidates);

        let synthesizer = AnswerSynthesizer::new(&self.config.retrieval, &k.samples, &k.registry);
        let sample_response = ranking
            .best()
            .and_then(|best| synthesizer.sample_for(role, &frameworks, best))
            .map(|s| s.concise.clone());

        Ok(RoleSpecificResult {
            ranked: ranking.context_chunks(),
            unfiltered,
            confidence: synthesizer.role_confidence(split.matches),
            sample_response,
        })
    }

    fn rank_for(
        &self,
        k: &Knowledge,
        query: &str,
        role: Option<&str>,
        frameworks: &[String],
        candidates: Vec<RankedChunk>,
    ) -> Ranking {
        let ctx = RankingContext::new(query, role, frameworks, &k.seeds);
        self.pipeline.rank(candidates, &ctx)
    }

    /// Chunks explicitly written for `role`, optionally within one framework.
    pub async fn role_guidance(&self, role: &str, framework: Option<&str>) -> RegwiseResult<RoleGuidance> {
        let k = self.knowledge().await?;
        let framework = framework.map(str::trim).filter(|f| !f.is_empty());
        let requested: Vec<String> = framework.map(str::to_string).into_iter().collect();
        let chunks: Vec<_> = k
            .store
            .by_role(role)?
            .into_iter()
            .filter(|c| c.targets_role(role))
            .filter(|c| requested.is_empty() || matches_any_hard(c.metadata.framework.as_deref(), &requested))
            .collect();

        let covered: BTreeSet<&str> = chunks
            .iter()
            .filter_map(|c| c.metadata.framework.as_deref())
            .collect();
        let summary = if chunks.is_empty() {
            format!("No guidance written for the {role} role yet.")
        } else {
            format!(
                "{} guidance chunks for the {role} role across {} frameworks: {}.",
                chunks.len(),
                covered.len(),
                covered.iter().copied().collect::<Vec<_>>().join(", ")
            )
        };

        let sample_response = match framework {
            Some(fw) => k.samples.lookup(role, &k.registry.family_of(fw)).cloned(),
            None => k
                .samples
                .families_for(role)
                .first()
                .and_then(|family| k.samples.lookup(role, family))
                .cloned(),
        };

        Ok(RoleGuidance {
            role: role.to_string(),
            framework: framework.map(str::to_string),
            chunks,
            summary,
            sample_response,
        })
    }
}
