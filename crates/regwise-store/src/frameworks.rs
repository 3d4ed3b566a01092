//! Framework registry: versioned ids to metadata and family keys.

use std::collections::BTreeMap;

use regwise_core::models::FrameworkMetadata;

#[derive(Debug, Clone, Default)]
pub struct FrameworkRegistry {
    entries: BTreeMap<String, FrameworkMetadata>,
}

impl FrameworkRegistry {
    pub fn new(frameworks: impl IntoIterator<Item = FrameworkMetadata>) -> Self {
        Self {
            entries: frameworks
                .into_iter()
                .map(|f| (f.id.to_lowercase(), f))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&FrameworkMetadata> {
        self.entries.get(&id.to_lowercase())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Family key for a framework id. Unregistered ids use their first
    /// dash-separated segment: `nis2-2023` -> `nis2`.
    pub fn family_of(&self, framework: &str) -> String {
        if let Some(meta) = self.get(framework) {
            return meta.family.clone();
        }
        let lower = framework.trim().to_lowercase();
        lower
            .split('-')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(lower.as_str())
            .to_string()
    }
}
