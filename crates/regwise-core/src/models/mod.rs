mod chunk;
mod degradation_event;
mod framework;
mod health_report;
mod qa;
mod requirement;
mod search_result;
mod stats;

pub use chunk::{normalize_label, ChunkInput, ChunkMetadata, ChunkType, Difficulty, KnowledgeChunk};
pub use degradation_event::DegradationEvent;
pub use framework::{FrameworkMetadata, SampleResponse};
pub use health_report::{EmbeddingStatus, HealthReport, HealthStatus};
pub use qa::{Alternate, QaRequest, QaResponse, RoleGuidance};
pub use requirement::{CrossReference, ImpactLevel, RegulatoryRequirement};
pub use search_result::{
    BranchTimings, KeywordHit, MultiModalResult, RankedChunk, RoleSpecificResult,
};
pub use stats::KnowledgeStats;
