//! ChunkStore: the indexed, single-writer / many-reader chunk set.

mod index;
pub mod stats;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use regwise_core::errors::{RegwiseError, RegwiseResult, StoreError};
use regwise_core::models::{Difficulty, KnowledgeChunk, KnowledgeStats};
use regwise_core::traits::IChunkStore;
use tracing::{debug, warn};

use index::ChunkIndex;

/// Outcome of a bulk insert. Rejections never abort the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub inserted: usize,
    pub rejected: Vec<(String, RegwiseError)>,
}

impl BatchReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Thread-safe chunk store.
///
/// All indices live behind a single `RwLock`, so a reader sees a chunk in
/// `by_id` exactly when it sees it in `by_concept`.
#[derive(Debug, Default)]
pub struct ChunkStore {
    index: RwLock<ChunkIndex>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RegwiseResult<RwLockReadGuard<'_, ChunkIndex>> {
        self.index.read().map_err(poisoned)
    }

    fn write(&self) -> RegwiseResult<RwLockWriteGuard<'_, ChunkIndex>> {
        self.index.write().map_err(poisoned)
    }

    /// Insert many chunks under one write lock. Invalid or duplicate chunks
    /// are reported and skipped.
    pub fn insert_batch(&self, chunks: Vec<KnowledgeChunk>) -> RegwiseResult<BatchReport> {
        let mut report = BatchReport::default();
        let mut index = self.write()?;
        for chunk in chunks {
            let id = chunk.id.clone();
            match prepare(chunk, &index) {
                Ok(chunk) => {
                    index.add(chunk);
                    report.inserted += 1;
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "chunk rejected during batch insert");
                    report.rejected.push((id, e));
                }
            }
        }
        debug_assert!(index.find_inconsistency().is_none());
        debug!(
            inserted = report.inserted,
            rejected = report.rejected.len(),
            "batch insert complete"
        );
        Ok(report)
    }

    /// Check the index invariants, reporting corruption as an error.
    pub fn verify_integrity(&self) -> RegwiseResult<()> {
        match self.read()?.find_inconsistency() {
            None => Ok(()),
            Some(details) => Err(StoreError::IndexCorruption { details }.into()),
        }
    }

    fn filtered(
        &self,
        pred: impl Fn(&KnowledgeChunk) -> bool,
    ) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        let index = self.read()?;
        Ok(index.ordered().filter(|c| pred(c)).cloned().collect())
    }
}

/// Validate and canonicalize a chunk against the current index.
fn prepare(mut chunk: KnowledgeChunk, index: &ChunkIndex) -> RegwiseResult<KnowledgeChunk> {
    chunk.id = chunk.id.trim().to_string();
    if chunk.id.is_empty() {
        return Err(StoreError::EmptyChunkId.into());
    }
    let confidence = chunk.metadata.confidence;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(StoreError::InvalidConfidence {
            id: chunk.id,
            value: confidence,
        }
        .into());
    }
    if index.contains_or_retired(&chunk.id) {
        return Err(StoreError::DuplicateChunkId { id: chunk.id }.into());
    }
    chunk.metadata.concepts = canonical_concepts(&chunk.metadata.concepts);
    Ok(chunk)
}

/// Lowercased, trimmed, deduplicated concepts in first-seen order.
fn canonical_concepts(concepts: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(concepts.len());
    for c in concepts {
        let label = c.trim().to_lowercase();
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

fn poisoned<T>(e: PoisonError<T>) -> RegwiseError {
    StoreError::LockPoisoned {
        reason: e.to_string(),
    }
    .into()
}

impl IChunkStore for ChunkStore {
    fn insert(&self, chunk: KnowledgeChunk) -> RegwiseResult<()> {
        let mut index = self.write()?;
        let chunk = prepare(chunk, &index)?;
        debug!(id = %chunk.id, concepts = chunk.metadata.concepts.len(), "chunk inserted");
        index.add(chunk);
        debug_assert!(index.find_inconsistency().is_none());
        Ok(())
    }

    fn retract(&self, id: &str) -> RegwiseResult<Option<Arc<KnowledgeChunk>>> {
        let mut index = self.write()?;
        let removed = index.remove(id);
        if removed.is_some() {
            debug!(id, "chunk retracted");
        }
        debug_assert!(index.find_inconsistency().is_none());
        Ok(removed)
    }

    fn get(&self, id: &str) -> RegwiseResult<Option<Arc<KnowledgeChunk>>> {
        Ok(self.read()?.by_id.get(id).cloned())
    }

    fn by_framework(&self, framework: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.filtered(|c| {
            c.metadata
                .framework
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(framework))
        })
    }

    fn by_role(&self, role: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.filtered(|c| c.matches_role(role))
    }

    fn by_jurisdiction(&self, code: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.filtered(|c| {
            c.metadata
                .jurisdiction
                .as_deref()
                .is_some_and(|j| j.eq_ignore_ascii_case(code))
        })
    }

    fn by_difficulty(&self, difficulty: Difficulty) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.filtered(|c| c.metadata.difficulty == Some(difficulty))
    }

    fn by_concept(&self, concept: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        let label = concept.trim().to_lowercase();
        let index = self.read()?;
        Ok(index
            .by_concept
            .get(&label)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| index.by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn snapshot(&self) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        Ok(self.read()?.ordered().cloned().collect())
    }

    fn concepts(&self) -> RegwiseResult<Vec<String>> {
        Ok(self.read()?.by_concept.keys().cloned().collect())
    }

    /// Single-lock override of the default two-step scan.
    fn concepts_matching(
        &self,
        query: &str,
    ) -> RegwiseResult<Vec<(String, Vec<Arc<KnowledgeChunk>>)>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let index = self.read()?;
        Ok(index
            .by_concept
            .iter()
            .filter(|(label, _)| needle.contains(label.as_str()) || label.contains(&needle))
            .map(|(label, ids)| {
                let chunks = ids
                    .iter()
                    .filter_map(|id| index.by_id.get(id).cloned())
                    .collect();
                (label.clone(), chunks)
            })
            .collect())
    }

    fn len(&self) -> RegwiseResult<usize> {
        Ok(self.read()?.by_id.len())
    }

    fn stats(&self) -> RegwiseResult<KnowledgeStats> {
        Ok(stats::compute(&*self.read()?))
    }
}
