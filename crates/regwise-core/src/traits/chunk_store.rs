use std::sync::Arc;

use crate::errors::RegwiseResult;
use crate::models::{Difficulty, KnowledgeChunk, KnowledgeStats};

/// Indexed, read-mostly chunk storage.
///
/// Inserts are atomic with respect to readers: a chunk is visible through
/// every index or through none.
pub trait IChunkStore: Send + Sync {
    // --- Writes ---
    fn insert(&self, chunk: KnowledgeChunk) -> RegwiseResult<()>;
    fn retract(&self, id: &str) -> RegwiseResult<Option<Arc<KnowledgeChunk>>>;

    // --- Lookup ---
    fn get(&self, id: &str) -> RegwiseResult<Option<Arc<KnowledgeChunk>>>;
    fn by_framework(&self, framework: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>>;
    fn by_role(&self, role: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>>;
    fn by_jurisdiction(&self, code: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>>;
    fn by_difficulty(&self, difficulty: Difficulty) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>>;
    fn by_concept(&self, concept: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>>;

    // --- Scans ---
    /// All chunks in insertion order.
    fn snapshot(&self) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>>;
    /// Indexed concept labels, sorted.
    fn concepts(&self) -> RegwiseResult<Vec<String>>;

    /// Concept labels contained in `query` (or containing all of it),
    /// paired with their chunks.
    fn concepts_matching(
        &self,
        query: &str,
    ) -> RegwiseResult<Vec<(String, Vec<Arc<KnowledgeChunk>>)>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for label in self.concepts()? {
            if needle.contains(label.as_str()) || label.contains(&needle) {
                let chunks = self.by_concept(&label)?;
                out.push((label, chunks));
            }
        }
        Ok(out)
    }

    // --- Aggregation ---
    fn len(&self) -> RegwiseResult<usize>;
    fn is_empty(&self) -> RegwiseResult<bool> {
        Ok(self.len()? == 0)
    }
    fn stats(&self) -> RegwiseResult<KnowledgeStats>;
}
