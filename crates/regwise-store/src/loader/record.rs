//! External record shape and its conversion into a `KnowledgeChunk`.

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use regwise_core::constants::GENERATED_ID_PREFIX;
use regwise_core::models::{ChunkMetadata, ChunkType, Difficulty, KnowledgeChunk};

/// Role keys read from `roles`, in output order.
const ROLE_KEYS: [&str; 4] = ["Developer", "ProductManager", "ComplianceOfficer", "CISO"];

/// Id fragment -> framework id. First match wins, so more specific
/// fragments come first.
const FRAMEWORK_HINTS: &[(&[&str], &str)] = &[
    (&["nis2"], "nis2-2023"),
    (&["dora"], "dora-2024"),
    (&["cra"], "cra-2024"),
    (&["iso27001", "iso-27001"], "iso-27001-2022"),
    (&["owasp-api"], "owasp-api-2023"),
    (&["owasp-web", "owasp-top10"], "owasp-top10-2021"),
    (&["ai-act"], "eu-ai-act-2024"),
    (&["iso42001", "iso-42001"], "iso-42001-2023"),
];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ExternalRecord {
    pub id: Option<String>,
    pub requirement_id: Option<String>,
    pub framework: Option<String>,
    pub metadata: ExternalMetadata,
    pub core_description: Option<String>,
    /// Pre-composed text, used when there is no `coreDescription`.
    pub text: Option<String>,
    #[serde(alias = "chunk_type")]
    pub chunk_type: Option<String>,
    pub roles: BTreeMap<String, RolePhrasing>,
    pub embedding: Option<Vec<f32>>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ExternalMetadata {
    pub framework: Option<String>,
    pub concepts: Vec<String>,
    #[serde(alias = "target_roles")]
    pub target_roles: Option<Vec<String>>,
    pub jurisdiction: Option<String>,
    pub difficulty: Option<String>,
    pub confidence: Option<f64>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RolePhrasing {
    pub phrasing: Option<String>,
    pub policy_guidance: Option<String>,
}

impl ExternalRecord {
    /// Convert into a chunk. Returns the reason when the record has no text.
    pub(crate) fn into_chunk(
        self,
        dimensions: usize,
        default_confidence: f64,
    ) -> Result<KnowledgeChunk, String> {
        let text = self.compose_text();
        if text.trim().is_empty() {
            return Err("record has no coreDescription or text".to_string());
        }
        let id = self
            .id
            .or(self.requirement_id)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{GENERATED_ID_PREFIX}{}", Uuid::new_v4()));
        let framework = self
            .framework
            .or(self.metadata.framework)
            .or_else(|| infer_framework(&id).map(str::to_string));
        let chunk_type = self
            .chunk_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or(ChunkType::Guidance);
        let difficulty = self
            .metadata
            .difficulty
            .as_deref()
            .and_then(|d| d.parse::<Difficulty>().ok());

        let metadata = ChunkMetadata {
            framework,
            concepts: self.metadata.concepts,
            target_roles: self.metadata.target_roles,
            jurisdiction: self.metadata.jurisdiction,
            difficulty,
            confidence: self
                .confidence
                .or(self.metadata.confidence)
                .unwrap_or(default_confidence),
            title: self.metadata.title,
            ..Default::default()
        };
        let embedding = self
            .embedding
            .filter(|e| e.len() == dimensions)
            .unwrap_or_default();
        Ok(KnowledgeChunk::new(id, text, chunk_type, metadata).with_embedding(embedding))
    }

    /// Core description, then `"<Role>: phrasing"` and
    /// `"<Role> Policy: guidance"` lines.
    fn compose_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        match (&self.core_description, &self.text) {
            (Some(core), _) if !core.trim().is_empty() => parts.push(core.clone()),
            (_, Some(text)) => parts.push(text.clone()),
            _ => {}
        }
        for key in ROLE_KEYS {
            let Some(role) = self.roles.get(key) else {
                continue;
            };
            if let Some(p) = role.phrasing.as_deref().filter(|p| !p.trim().is_empty()) {
                parts.push(format!("{key}: {p}"));
            }
            if let Some(g) = role.policy_guidance.as_deref().filter(|g| !g.trim().is_empty()) {
                parts.push(format!("{key} Policy: {g}"));
            }
        }
        parts.join("\n")
    }
}

/// Framework id implied by a record id, if any.
pub fn infer_framework(id: &str) -> Option<&'static str> {
    let lower = id.to_lowercase();
    FRAMEWORK_HINTS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| lower.contains(f)))
        .map(|(_, framework)| *framework)
}
