use serde::{Deserialize, Serialize};

/// Severity of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Link from a requirement to one in another framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReference {
    pub framework: String,
    pub requirement_id: String,
    pub relationship: String,
}

/// A structured obligation from a framework dataset. Searched by keyword,
/// independent of embeddings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryRequirement {
    pub id: String,
    pub framework: String,
    pub title: String,
    pub description: String,
    pub citation: String,
    pub content: String,
    pub impact: ImpactLevel,
    pub category: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub implementation: Vec<String>,
    #[serde(default)]
    pub compliance: Vec<String>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
}

impl RegulatoryRequirement {
    /// Id of the chunk derived from `content`.
    pub fn description_chunk_id(&self) -> String {
        format!("{}-desc", self.id)
    }

    /// Id of the chunk derived from the requirement list.
    pub fn requirements_chunk_id(&self) -> String {
        format!("{}-req", self.id)
    }
}
