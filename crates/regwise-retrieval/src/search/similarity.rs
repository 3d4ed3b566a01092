//! Threshold scan over chunk embeddings.

use rayon::prelude::*;
use regwise_core::errors::RegwiseResult;
use regwise_core::models::RankedChunk;
use regwise_core::traits::{IChunkStore, IEmbeddingProvider};
use tracing::debug;

use super::sort_by_similarity;
use crate::query::lexical_score;

pub struct SimilaritySearch<'a> {
    store: &'a dyn IChunkStore,
    embedder: &'a dyn IEmbeddingProvider,
}

impl<'a> SimilaritySearch<'a> {
    pub fn new(store: &'a dyn IChunkStore, embedder: &'a dyn IEmbeddingProvider) -> Self {
        Self { store, embedder }
    }

    /// Embed `query` once and return chunks with similarity >= `threshold`,
    /// best first. Fails only if the query cannot be embedded.
    pub fn search(&self, query: &str, threshold: f64) -> RegwiseResult<Vec<RankedChunk>> {
        let query_vec = self.embedder.embed(query)?;
        self.search_embedding(&query_vec, threshold)
    }

    /// Scan with a precomputed query embedding. Chunks without an
    /// embedding are skipped.
    pub fn search_embedding(
        &self,
        query_vec: &[f32],
        threshold: f64,
    ) -> RegwiseResult<Vec<RankedChunk>> {
        let snapshot = self.store.snapshot()?;
        let mut results: Vec<RankedChunk> = snapshot
            .par_iter()
            .filter(|c| c.has_embedding())
            .filter_map(|c| {
                let similarity = self.embedder.similarity(query_vec, &c.embedding);
                (similarity >= threshold).then(|| RankedChunk::new(c.clone(), similarity))
            })
            .collect();
        sort_by_similarity(&mut results);
        debug!(threshold, hits = results.len(), "similarity search");
        Ok(results)
    }

    /// Word-overlap scan used when the query cannot be embedded.
    pub fn search_lexical(&self, query: &str, threshold: f64) -> RegwiseResult<Vec<RankedChunk>> {
        let snapshot = self.store.snapshot()?;
        let mut results: Vec<RankedChunk> = snapshot
            .par_iter()
            .filter_map(|c| {
                let score = lexical_score(query, &c.text);
                (score > 0.0 && score >= threshold).then(|| RankedChunk::new(c.clone(), score))
            })
            .collect();
        sort_by_similarity(&mut results);
        debug!(threshold, hits = results.len(), "lexical search");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regwise_core::models::{ChunkMetadata, ChunkType, KnowledgeChunk};
    use regwise_store::ChunkStore;

    use crate::testing::AxisEmbedder;

    fn store_with(chunks: &[(&str, Vec<f32>)]) -> ChunkStore {
        let store = ChunkStore::new();
        for (id, emb) in chunks {
            let chunk = KnowledgeChunk::new(*id, *id, ChunkType::Description, ChunkMetadata::default())
                .with_embedding(emb.clone());
            store.insert(chunk).unwrap();
        }
        store
    }

    #[test]
    fn empty_store_returns_empty() {
        let store = ChunkStore::new();
        let search = SimilaritySearch::new(&store, &AxisEmbedder);
        assert!(search.search("x", 0.0).unwrap().is_empty());
    }

    #[test]
    fn threshold_is_inclusive_and_ties_keep_insertion_order() {
        let store = store_with(&[
            ("first", vec![1.0, 0.0]),
            ("orthogonal", vec![0.0, 1.0]),
            ("second", vec![2.0, 0.0]),
        ]);
        let search = SimilaritySearch::new(&store, &AxisEmbedder);
        let hits = search.search_embedding(&[1.0, 0.0], 1.0).unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn chunks_without_embeddings_are_invisible() {
        let store = store_with(&[("zero", vec![0.0, 0.0]), ("none", Vec::new())]);
        let search = SimilaritySearch::new(&store, &AxisEmbedder);
        assert!(search.search_embedding(&[1.0, 0.0], -1.0).unwrap().is_empty());
    }

    #[test]
    fn lexical_scan_scores_overlap() {
        let store = ChunkStore::new();
        store
            .insert(KnowledgeChunk::new(
                "a",
                "Rotate encryption keys yearly",
                ChunkType::Guidance,
                ChunkMetadata::default(),
            ))
            .unwrap();
        let search = SimilaritySearch::new(&store, &AxisEmbedder);
        let hits = search.search_lexical("encryption keys", 0.1).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(search.search_lexical("firewall", 0.0).unwrap().is_empty());
    }
}
