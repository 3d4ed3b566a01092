//! Keyword search over structured requirements, independent of embeddings.

use std::collections::HashMap;
use std::sync::Arc;

use regwise_core::models::{ImpactLevel, RegulatoryRequirement};
use tracing::{debug, warn};

/// Field weights for keyword relevance.
const TITLE_WEIGHT: u32 = 3;
const DESCRIPTION_WEIGHT: u32 = 2;
const CITATION_WEIGHT: u32 = 2;
const CONTENT_WEIGHT: u32 = 1;
const CATEGORY_WEIGHT: u32 = 1;

/// Highest relevance a requirement can reach.
pub const MAX_RELEVANCE: u32 =
    TITLE_WEIGHT + DESCRIPTION_WEIGHT + CITATION_WEIGHT + CONTENT_WEIGHT + CATEGORY_WEIGHT;

/// A requirement that matched a keyword query.
#[derive(Debug, Clone)]
pub struct RequirementMatch {
    pub requirement: Arc<RegulatoryRequirement>,
    pub relevance: u32,
    pub matched_fields: Vec<String>,
    /// Cross-referenced requirements that exist in this store.
    pub related: Vec<Arc<RegulatoryRequirement>>,
}

impl RequirementMatch {
    /// Relevance scaled to [0, 1].
    pub fn normalized_relevance(&self) -> f64 {
        f64::from(self.relevance) / f64::from(MAX_RELEVANCE)
    }
}

/// Immutable after construction.
#[derive(Debug, Default)]
pub struct RequirementStore {
    requirements: Vec<Arc<RegulatoryRequirement>>,
    by_id: HashMap<String, usize>,
}

impl RequirementStore {
    /// Build the store. Later duplicates of an id are dropped.
    pub fn new(requirements: impl IntoIterator<Item = RegulatoryRequirement>) -> Self {
        let mut store = Self::default();
        for req in requirements {
            if store.by_id.contains_key(&req.id) {
                warn!(id = %req.id, "duplicate requirement id skipped");
                continue;
            }
            store.by_id.insert(req.id.clone(), store.requirements.len());
            store.requirements.push(Arc::new(req));
        }
        store
    }

    pub fn get(&self, id: &str) -> Option<Arc<RegulatoryRequirement>> {
        self.by_id.get(id).map(|&i| Arc::clone(&self.requirements[i]))
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn by_framework(&self, framework: &str) -> Vec<Arc<RegulatoryRequirement>> {
        self.filter(|r| r.framework.eq_ignore_ascii_case(framework))
    }

    pub fn by_category(&self, category: &str) -> Vec<Arc<RegulatoryRequirement>> {
        self.filter(|r| r.category.eq_ignore_ascii_case(category))
    }

    pub fn by_impact(&self, impact: ImpactLevel) -> Vec<Arc<RegulatoryRequirement>> {
        self.filter(|r| r.impact == impact)
    }

    /// Case-insensitive substring match of the whole term against each
    /// searchable field. Sorted by relevance, ties in insertion order.
    pub fn search_across_frameworks(&self, term: &str) -> Vec<RequirementMatch> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<RequirementMatch> = self
            .requirements
            .iter()
            .filter_map(|req| self.score(req, &needle))
            .collect();
        // Stable: equal relevance keeps insertion order.
        matches.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        debug!(term = %needle, hits = matches.len(), "requirement keyword search");
        matches
    }

    fn score(&self, req: &Arc<RegulatoryRequirement>, needle: &str) -> Option<RequirementMatch> {
        let fields: [(&str, &str, u32); 5] = [
            ("title", req.title.as_str(), TITLE_WEIGHT),
            ("description", req.description.as_str(), DESCRIPTION_WEIGHT),
            ("content", req.content.as_str(), CONTENT_WEIGHT),
            ("category", req.category.as_str(), CATEGORY_WEIGHT),
            ("citation", req.citation.as_str(), CITATION_WEIGHT),
        ];
        let mut relevance = 0;
        let mut matched_fields = Vec::new();
        for (name, value, weight) in fields {
            if value.to_lowercase().contains(needle) {
                relevance += weight;
                matched_fields.push(name.to_string());
            }
        }
        if relevance == 0 {
            return None;
        }
        let related = req
            .cross_references
            .iter()
            .filter_map(|x| self.get(&x.requirement_id))
            .collect();
        Some(RequirementMatch {
            requirement: Arc::clone(req),
            relevance,
            matched_fields,
            related,
        })
    }

    fn filter(&self, pred: impl Fn(&RegulatoryRequirement) -> bool) -> Vec<Arc<RegulatoryRequirement>> {
        self.requirements
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regwise_core::models::CrossReference;

    fn req(id: &str, title: &str, category: &str, content: &str) -> RegulatoryRequirement {
        RegulatoryRequirement {
            id: id.to_string(),
            framework: "owasp-top10-2021".to_string(),
            title: title.to_string(),
            description: String::new(),
            citation: id.to_uppercase(),
            content: content.to_string(),
            impact: ImpactLevel::High,
            category: category.to_string(),
            requirements: Vec::new(),
            implementation: Vec::new(),
            compliance: Vec::new(),
            cross_references: Vec::new(),
        }
    }

    #[test]
    fn title_outweighs_content() {
        let store = RequirementStore::new([
            req("a", "Logging", "Monitoring", "Use encryption at rest"),
            req("b", "Encryption", "Cryptography", "Protect keys"),
        ]);
        let hits = store.search_across_frameworks("ENCRYPTION");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].requirement.id, "b");
        assert_eq!(hits[0].relevance, TITLE_WEIGHT);
        assert_eq!(hits[1].matched_fields, vec!["content"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let store = RequirementStore::new([
            req("x", "Access", "Access Control", ""),
            req("y", "Access", "Access Control", ""),
        ]);
        let ids: Vec<_> = store
            .search_across_frameworks("access")
            .iter()
            .map(|m| m.requirement.id.clone())
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn whole_term_must_appear() {
        let store = RequirementStore::new([req("a", "Broken Access Control", "Access Control", "")]);
        assert!(store.search_across_frameworks("access policy").is_empty());
        assert!(store.search_across_frameworks("  ").is_empty());
    }

    #[test]
    fn duplicates_dropped_and_cross_refs_resolved() {
        let mut a = req("a", "A", "Cat", "");
        a.cross_references.push(CrossReference {
            framework: "owasp-top10-2021".to_string(),
            requirement_id: "b".to_string(),
            relationship: "related".to_string(),
        });
        let store = RequirementStore::new([a, req("b", "B", "Cat", ""), req("b", "B2", "Cat", "")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b").unwrap().title, "B");
        let hits = store.search_across_frameworks("cat");
        assert_eq!(hits[0].related.len(), 1);
        assert!((hits[0].normalized_relevance() - 1.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn filters() {
        let mut low = req("low", "L", "Logging", "");
        low.impact = ImpactLevel::Low;
        let store = RequirementStore::new([low, req("hi", "H", "Injection", "")]);
        assert_eq!(store.by_impact(ImpactLevel::Low).len(), 1);
        assert_eq!(store.by_category("injection").len(), 1);
        assert_eq!(store.by_framework("OWASP-TOP10-2021").len(), 2);
    }
}
