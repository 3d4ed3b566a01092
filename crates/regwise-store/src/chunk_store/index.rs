//! Index structures guarded by the store lock.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use regwise_core::models::KnowledgeChunk;

/// All lookup structures for the chunk set. Mutated only under the write lock.
#[derive(Debug, Default)]
pub(crate) struct ChunkIndex {
    pub(crate) by_id: HashMap<String, Arc<KnowledgeChunk>>,
    /// Live ids in insertion order.
    pub(crate) order: Vec<String>,
    /// Normalized concept label -> ids in insertion order.
    pub(crate) by_concept: BTreeMap<String, Vec<String>>,
    /// Ids that were retracted. They are never reused.
    pub(crate) retired: HashSet<String>,
}

impl ChunkIndex {
    pub(crate) fn contains_or_retired(&self, id: &str) -> bool {
        self.by_id.contains_key(id) || self.retired.contains(id)
    }

    /// Add a validated chunk to every index.
    pub(crate) fn add(&mut self, chunk: KnowledgeChunk) {
        let id = chunk.id.clone();
        for concept in &chunk.metadata.concepts {
            self.by_concept
                .entry(concept.clone())
                .or_default()
                .push(id.clone());
        }
        self.order.push(id.clone());
        self.by_id.insert(id, Arc::new(chunk));
    }

    /// Remove a chunk from every index and retire its id.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Arc<KnowledgeChunk>> {
        let chunk = self.by_id.remove(id)?;
        self.order.retain(|x| x != id);
        for concept in &chunk.metadata.concepts {
            if let Some(ids) = self.by_concept.get_mut(concept) {
                ids.retain(|x| x != id);
                if ids.is_empty() {
                    self.by_concept.remove(concept);
                }
            }
        }
        self.retired.insert(id.to_string());
        Some(chunk)
    }

    /// Chunks in insertion order.
    pub(crate) fn ordered(&self) -> impl Iterator<Item = &Arc<KnowledgeChunk>> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Describe the first inconsistency between the indices, if any.
    pub(crate) fn find_inconsistency(&self) -> Option<String> {
        if self.order.len() != self.by_id.len() {
            return Some(format!(
                "order has {} ids but by_id has {}",
                self.order.len(),
                self.by_id.len()
            ));
        }
        for id in &self.order {
            let Some(chunk) = self.by_id.get(id) else {
                return Some(format!("{id} is ordered but missing from by_id"));
            };
            for concept in &chunk.metadata.concepts {
                let indexed = self
                    .by_concept
                    .get(concept)
                    .is_some_and(|ids| ids.iter().any(|x| x == id));
                if !indexed {
                    return Some(format!("{id} is missing from concept '{concept}'"));
                }
            }
        }
        for (concept, ids) in &self.by_concept {
            for id in ids {
                let tagged = self
                    .by_id
                    .get(id)
                    .is_some_and(|c| c.metadata.concepts.iter().any(|x| x == concept));
                if !tagged {
                    return Some(format!("orphaned edge '{concept}' -> {id}"));
                }
            }
        }
        None
    }
}
