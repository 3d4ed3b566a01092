use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::chunk::KnowledgeChunk;
use super::framework::SampleResponse;
use crate::intent::QueryIntent;

/// A natural-language question with optional role and framework hints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QaRequest {
    pub question: String,
    pub role: Option<String>,
    /// Requested framework identifiers in priority order.
    pub frameworks: Vec<String>,
}

impl QaRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_frameworks<I, S>(mut self, frameworks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frameworks = frameworks.into_iter().map(Into::into).collect();
        self
    }
}

/// An alternate candidate shown when the winner is ambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternate {
    pub id: String,
    pub framework: String,
    pub preview: String,
}

/// Final cited answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaResponse {
    /// False only for the "could not find" fallback.
    pub success: bool,
    pub answer: String,
    pub confidence: f64,
    pub citations: Vec<String>,
    pub best_match_id: Option<String>,
    pub best_match_framework: Option<String>,
    pub context_ids: Vec<String>,
    pub alternates: Vec<Alternate>,
    pub intents: Vec<QueryIntent>,
}

/// Role-targeted guidance listing.
#[derive(Debug, Clone, Serialize)]
pub struct RoleGuidance {
    pub role: String,
    pub framework: Option<String>,
    pub chunks: Vec<Arc<KnowledgeChunk>>,
    pub summary: String,
    pub sample_response: Option<SampleResponse>,
}
