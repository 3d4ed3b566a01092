//! Keyword branch: requirement-store matches resolved to their chunks.

use regwise_core::errors::RegwiseResult;
use regwise_core::models::{KeywordHit, RankedChunk};
use regwise_core::traits::IChunkStore;
use regwise_store::RequirementStore;

/// Requirement matches for `query`, each carrying the store chunks derived
/// from it. Chunk similarity is the normalized keyword relevance.
pub fn search(
    requirements: &RequirementStore,
    store: &dyn IChunkStore,
    query: &str,
    role: Option<&str>,
) -> RegwiseResult<Vec<KeywordHit>> {
    let mut hits = Vec::new();
    for m in requirements.search_across_frameworks(query) {
        let req = &m.requirement;
        let similarity = m.normalized_relevance();
        let mut chunks = Vec::with_capacity(2);
        for id in [req.description_chunk_id(), req.requirements_chunk_id()] {
            if let Some(chunk) = store.get(&id)? {
                chunks.push(RankedChunk::new(chunk, similarity));
            }
        }
        super::retain_role(&mut chunks, role);
        hits.push(KeywordHit {
            requirement_id: req.id.clone(),
            framework: req.framework.clone(),
            title: req.title.clone(),
            relevance: m.relevance,
            matched_fields: m.matched_fields,
            chunks,
        });
    }
    Ok(hits)
}
