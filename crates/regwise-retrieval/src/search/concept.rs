//! Concept branch: exact topical matches at a fixed pseudo-similarity.

use std::collections::HashSet;

use regwise_core::errors::RegwiseResult;
use regwise_core::models::RankedChunk;
use regwise_core::traits::IChunkStore;

/// Chunks tagged with a concept that appears in the query, or whose label
/// contains the whole query. A chunk matched by several concepts is listed
/// once.
pub fn search(
    store: &dyn IChunkStore,
    query: &str,
    role: Option<&str>,
    similarity: f64,
) -> RegwiseResult<Vec<RankedChunk>> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();
    for (_, chunks) in store.concepts_matching(query)? {
        for chunk in chunks {
            if seen.insert(chunk.id.clone()) {
                results.push(RankedChunk::new(chunk, similarity));
            }
        }
    }
    super::retain_role(&mut results, role);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regwise_core::models::{ChunkMetadata, ChunkType, KnowledgeChunk};
    use regwise_store::ChunkStore;

    fn tagged(id: &str, concepts: &[&str], roles: Option<&[&str]>) -> KnowledgeChunk {
        KnowledgeChunk::new(
            id,
            "text",
            ChunkType::Control,
            ChunkMetadata {
                concepts: concepts.iter().map(|c| c.to_string()).collect(),
                target_roles: roles.map(|r| r.iter().map(|s| s.to_string()).collect()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn concept_in_query_matches_once_per_chunk() {
        let store = ChunkStore::new();
        store.insert(tagged("a", &["encryption", "key management"], None)).unwrap();
        store.insert(tagged("b", &["logging"], None)).unwrap();
        let hits = search(&store, "encryption and key management", None, 0.8).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "a");
        assert_eq!(hits[0].similarity, 0.8);
    }

    #[test]
    fn role_filter_applies() {
        let store = ChunkStore::new();
        store.insert(tagged("pm", &["roadmap"], Some(&["product manager"]))).unwrap();
        store.insert(tagged("all", &["roadmap"], None)).unwrap();
        let hits = search(&store, "roadmap", Some("developer"), 0.8).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "all");
    }
}
