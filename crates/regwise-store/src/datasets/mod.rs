//! Compiled-in framework datasets.
//!
//! The JSON files next to this module are embedded with `include_str!` and
//! parsed once at startup. A parse failure is a build-time data bug and is
//! reported as `IngestError::InvalidDataset`.

use serde::de::DeserializeOwned;

use regwise_core::errors::{IngestError, RegwiseResult};
use regwise_core::models::{
    normalize_label, ChunkMetadata, ChunkType, FrameworkMetadata, KnowledgeChunk,
    RegulatoryRequirement, SampleResponse,
};

use crate::frameworks::FrameworkRegistry;

const FRAMEWORKS_JSON: &str = include_str!("frameworks.json");
const CHUNKS_JSON: &str = include_str!("regulatory_chunks.json");
const OWASP_TOP10_JSON: &str = include_str!("owasp_top10_2021.json");
const SAMPLE_RESPONSES_JSON: &str = include_str!("sample_responses.json");

/// Everything shipped with the binary.
#[derive(Debug, Clone)]
pub struct StaticDatasets {
    pub frameworks: Vec<FrameworkMetadata>,
    pub chunks: Vec<KnowledgeChunk>,
    pub requirements: Vec<RegulatoryRequirement>,
    pub sample_responses: Vec<SampleResponse>,
}

impl StaticDatasets {
    pub fn load() -> RegwiseResult<Self> {
        Ok(Self {
            frameworks: parse("frameworks", FRAMEWORKS_JSON)?,
            chunks: parse("regulatory_chunks", CHUNKS_JSON)?,
            requirements: parse("owasp_top10_2021", OWASP_TOP10_JSON)?,
            sample_responses: parse("sample_responses", SAMPLE_RESPONSES_JSON)?,
        })
    }

    pub fn registry(&self) -> FrameworkRegistry {
        FrameworkRegistry::new(self.frameworks.iter().cloned())
    }

    /// Literal chunks followed by the two chunks derived from each requirement.
    pub fn all_chunks(&self) -> Vec<KnowledgeChunk> {
        let mut out = self.chunks.clone();
        out.extend(self.requirements.iter().flat_map(requirement_chunks));
        out
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> RegwiseResult<T> {
    serde_json::from_str(raw).map_err(|e| {
        IngestError::InvalidDataset {
            name: name.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Description and requirement-list chunks for a structured requirement.
pub fn requirement_chunks(req: &RegulatoryRequirement) -> [KnowledgeChunk; 2] {
    let metadata = ChunkMetadata {
        framework: Some(req.framework.clone()),
        concepts: vec![req.category.to_lowercase()],
        title: Some(req.title.clone()),
        category: Some(req.category.clone()),
        article: Some(req.citation.clone()),
        ..Default::default()
    };
    [
        KnowledgeChunk::new(
            req.description_chunk_id(),
            format!("{}: {}", req.title, req.content),
            ChunkType::Description,
            metadata.clone(),
        ),
        KnowledgeChunk::new(
            req.requirements_chunk_id(),
            format!("{} requirements: {}", req.title, req.requirements.join("; ")),
            ChunkType::Requirement,
            metadata,
        ),
    ]
}

/// Role x framework-family lookup of canned "Sample Implementation" text.
#[derive(Debug, Clone, Default)]
pub struct SampleResponseBook {
    entries: Vec<SampleResponse>,
}

impl SampleResponseBook {
    pub fn new(entries: Vec<SampleResponse>) -> Self {
        Self { entries }
    }

    /// Role comparison ignores case and separators; family is exact after
    /// lowercasing.
    pub fn lookup(&self, role: &str, family: &str) -> Option<&SampleResponse> {
        let role = normalize_label(role);
        let family = family.to_lowercase();
        self.entries
            .iter()
            .find(|e| normalize_label(&e.role) == role && e.family == family)
    }

    /// Families with an entry for `role`.
    pub fn families_for(&self, role: &str) -> Vec<&str> {
        let role = normalize_label(role);
        self.entries
            .iter()
            .filter(|e| normalize_label(&e.role) == role)
            .map(|e| e.family.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
