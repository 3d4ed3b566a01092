use std::collections::{BTreeMap, BTreeSet};

use regwise_core::models::KnowledgeStats;

use super::index::ChunkIndex;

/// Bucket for chunks that do not restrict their audience.
pub const ALL_ROLES_BUCKET: &str = "all";
/// Bucket for chunks without a difficulty.
pub const UNSPECIFIED_BUCKET: &str = "unspecified";

pub(crate) fn compute(index: &ChunkIndex) -> KnowledgeStats {
    let mut frameworks = BTreeSet::new();
    let mut jurisdictions = BTreeSet::new();
    let mut role_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut difficulty_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut chunk_types: BTreeMap<String, usize> = BTreeMap::new();
    let mut confidence_sum = 0.0;
    let mut total_embeddings = 0;

    for chunk in index.ordered() {
        let meta = &chunk.metadata;
        if let Some(fw) = &meta.framework {
            frameworks.insert(fw.clone());
        }
        if let Some(j) = &meta.jurisdiction {
            jurisdictions.insert(j.clone());
        }
        match meta.target_roles.as_deref() {
            Some(roles) if !roles.is_empty() => {
                for role in roles {
                    *role_distribution.entry(role.to_lowercase()).or_default() += 1;
                }
            }
            _ => *role_distribution.entry(ALL_ROLES_BUCKET.to_string()).or_default() += 1,
        }
        let difficulty = meta.difficulty.map_or(UNSPECIFIED_BUCKET, |d| d.as_str());
        *difficulty_distribution.entry(difficulty.to_string()).or_default() += 1;
        *chunk_types.entry(chunk.chunk_type.to_string()).or_default() += 1;
        confidence_sum += meta.confidence;
        if chunk.has_embedding() {
            total_embeddings += 1;
        }
    }

    let total_chunks = index.by_id.len();
    KnowledgeStats {
        total_chunks,
        total_embeddings,
        frameworks: frameworks.into_iter().collect(),
        jurisdictions: jurisdictions.into_iter().collect(),
        avg_confidence: if total_chunks == 0 {
            0.0
        } else {
            confidence_sum / total_chunks as f64
        },
        role_distribution,
        difficulty_distribution,
        chunk_types,
        concept_count: index.by_concept.len(),
    }
}
