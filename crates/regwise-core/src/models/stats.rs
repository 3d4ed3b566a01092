use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate statistics over the chunk store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub total_chunks: usize,
    pub total_embeddings: usize,
    pub frameworks: Vec<String>,
    pub jurisdictions: Vec<String>,
    pub avg_confidence: f64,
    pub role_distribution: BTreeMap<String, usize>,
    pub difficulty_distribution: BTreeMap<String, usize>,
    pub chunk_types: BTreeMap<String, usize>,
    pub concept_count: usize,
}
