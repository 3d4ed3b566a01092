use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::chunk::KnowledgeChunk;

/// A chunk paired with its similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct RankedChunk {
    pub chunk: Arc<KnowledgeChunk>,
    pub similarity: f64,
}

impl RankedChunk {
    pub fn new(chunk: Arc<KnowledgeChunk>, similarity: f64) -> Self {
        Self { chunk, similarity }
    }

    pub fn id(&self) -> &str {
        &self.chunk.id
    }
}

/// A keyword match against the requirement store.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordHit {
    pub requirement_id: String,
    pub framework: String,
    pub title: String,
    /// Weighted field score (title 3, description 2, citation 2, content 1, category 1).
    pub relevance: u32,
    pub matched_fields: Vec<String>,
    /// Store chunks derived from this requirement.
    pub chunks: Vec<RankedChunk>,
}

/// Wall-clock time spent in each search branch.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BranchTimings {
    pub semantic: Duration,
    pub keyword: Duration,
    pub concept: Duration,
}

/// Output of the three-branch search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MultiModalResult {
    pub semantic: Vec<RankedChunk>,
    pub keyword: Vec<KeywordHit>,
    pub concept: Vec<RankedChunk>,
    /// Chunk entries across all branches, duplicates included; equals
    /// `candidates().len()`.
    pub total_count: usize,
    pub elapsed: Duration,
    pub timings: BranchTimings,
    /// Set when the query could not be embedded and the semantic branch
    /// fell back to lexical scoring.
    pub degraded: bool,
}

impl MultiModalResult {
    /// Merge the branches into one candidate list: semantic first, then
    /// concept, then keyword-derived chunks. Duplicates are kept; ranking
    /// removes them.
    pub fn candidates(&self) -> Vec<RankedChunk> {
        let mut out = Vec::with_capacity(self.total_count);
        out.extend(self.semantic.iter().cloned());
        out.extend(self.concept.iter().cloned());
        for hit in &self.keyword {
            out.extend(hit.chunks.iter().cloned());
        }
        out
    }
}

/// Role-targeted search output.
#[derive(Debug, Clone, Serialize)]
pub struct RoleSpecificResult {
    /// Ranked context: role matches, or all candidates when none matched.
    pub ranked: Vec<RankedChunk>,
    /// Everything above threshold before role filtering.
    pub unfiltered: Vec<RankedChunk>,
    pub confidence: f64,
    pub sample_response: Option<String>,
}
