//! # regwise-core
//!
//! Foundation crate for the regwise knowledge engine.
//! Defines the chunk model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod similarity;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RegwiseConfig;
pub use errors::{RegwiseError, RegwiseResult};
pub use intent::QueryIntent;
pub use models::{ChunkMetadata, ChunkType, KnowledgeChunk};
pub use similarity::cosine_similarity;
