//! Search: embedding similarity, requirement keywords, concept labels.

pub mod concept;
pub mod keyword;
pub mod multimodal;
pub mod similarity;

pub use multimodal::MultiModalSearch;
pub use similarity::SimilaritySearch;

use regwise_core::models::RankedChunk;

/// Keep only chunks written for `role` (chunks without target roles pass).
pub(crate) fn retain_role(results: &mut Vec<RankedChunk>, role: Option<&str>) {
    if let Some(role) = role {
        results.retain(|r| r.chunk.matches_role(role));
    }
}

/// Stable sort by similarity, highest first; ties keep input order.
pub(crate) fn sort_by_similarity(results: &mut [RankedChunk]) {
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}
