use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rhetorical role of a chunk's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Description,
    Requirement,
    Obligation,
    Implementation,
    Compliance,
    Example,
    Control,
    Guidance,
    Other,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Requirement => "requirement",
            Self::Obligation => "obligation",
            Self::Implementation => "implementation",
            Self::Compliance => "compliance",
            Self::Example => "example",
            Self::Control => "control",
            Self::Guidance => "guidance",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkType {
    type Err = std::convert::Infallible;

    /// Unknown labels map to `Other` so external sources never fail on type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "description" => Self::Description,
            "requirement" => Self::Requirement,
            "obligation" => Self::Obligation,
            "implementation" => Self::Implementation,
            "compliance" => Self::Compliance,
            "example" | "examples" => Self::Example,
            "control" => Self::Control,
            "guidance" | "role_guidance" => Self::Guidance,
            _ => Self::Other,
        })
    }
}

/// Reader level a chunk is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Descriptive fields attached to every chunk.
///
/// Optional fields have documented meanings when absent:
/// no `framework` means generic content, no `target_roles` means the chunk
/// applies to every role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkMetadata {
    pub framework: Option<String>,
    pub concepts: Vec<String>,
    pub target_roles: Option<Vec<String>>,
    pub jurisdiction: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Quality score in [0, 1]. Values outside are rejected at insert.
    pub confidence: f64,
    pub language: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub article: Option<String>,
    pub source: Option<String>,
}

impl Default for ChunkMetadata {
    fn default() -> Self {
        Self {
            framework: None,
            concepts: Vec::new(),
            target_roles: None,
            jurisdiction: None,
            difficulty: None,
            confidence: 1.0,
            language: "en".to_string(),
            title: None,
            category: None,
            article: None,
            source: None,
        }
    }
}

/// A single retrievable unit of regulatory knowledge.
///
/// Never mutated after insertion; an update is a retract plus an insert
/// under a new id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    pub id: String,
    pub text: String,
    pub chunk_type: ChunkType,
    #[serde(default)]
    pub metadata: ChunkMetadata,
    /// Empty until embedded, or permanently empty if embedding failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
}

impl KnowledgeChunk {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        chunk_type: ChunkType,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            chunk_type,
            metadata,
            embedding: Vec::new(),
        }
    }

    /// Attach an embedding, consuming self.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    /// Whether this chunk can take part in semantic search.
    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty() && self.embedding.iter().any(|v| *v != 0.0)
    }

    /// Framework label, or `"unknown"` for generic content.
    pub fn framework_label(&self) -> &str {
        self.metadata
            .framework
            .as_deref()
            .unwrap_or(crate::constants::UNKNOWN_FRAMEWORK)
    }

    /// Whether the chunk is written for every role.
    pub fn applies_to_all_roles(&self) -> bool {
        self.metadata
            .target_roles
            .as_ref()
            .map_or(true, |roles| roles.is_empty())
    }

    /// Fuzzy role match: case- and separator-insensitive substring in
    /// either direction. A chunk with no target roles matches every role.
    pub fn matches_role(&self, role: &str) -> bool {
        let Some(roles) = self.metadata.target_roles.as_ref() else {
            return true;
        };
        if roles.is_empty() {
            return true;
        }
        let wanted = normalize_label(role);
        if wanted.is_empty() {
            return true;
        }
        roles.iter().any(|r| {
            let have = normalize_label(r);
            !have.is_empty() && (have.contains(&wanted) || wanted.contains(&have))
        })
    }

    /// Whether the chunk is explicitly targeted at `role` (ignores the
    /// applies-to-everyone default).
    pub fn targets_role(&self, role: &str) -> bool {
        !self.applies_to_all_roles() && self.matches_role(role)
    }
}

/// Lowercase and strip everything but alphanumerics, so that
/// "Product Manager", "product_manager" and "ProductManager" compare equal.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Caller-supplied chunk for dynamic insertion. The engine embeds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkInput {
    pub id: String,
    pub text: String,
    pub chunk_type: ChunkType,
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

impl From<ChunkInput> for KnowledgeChunk {
    fn from(input: ChunkInput) -> Self {
        KnowledgeChunk::new(input.id, input.text, input.chunk_type, input.metadata)
    }
}
