use serde::{Deserialize, Serialize};

/// Registry entry describing a regulatory framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkMetadata {
    /// Versioned identifier, e.g. `owasp-top10-2021`.
    pub id: String,
    pub name: String,
    pub version: String,
    pub jurisdiction: String,
    pub authority: String,
    pub source_url: String,
    /// Unversioned family key used for sample responses, e.g. `owasp`.
    pub family: String,
}

/// Canned example phrasing for a role and framework family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResponse {
    pub role: String,
    pub family: String,
    pub concise: String,
    pub detailed: String,
}
