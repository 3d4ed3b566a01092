//! # regwise-retrieval
//!
//! Retrieval and ranking over the regulatory knowledge base.
//!
//! - [`search`]: embedding similarity, requirement keywords, concept labels
//! - [`ranking`]: the staged re-ranking pipeline and near-tie resolution
//! - [`synthesis`]: best match plus context into a cited answer
//! - [`engine`]: the [`KnowledgeEngine`] handle callers share

pub mod engine;
pub mod query;
pub mod ranking;
pub mod search;
pub mod synthesis;
pub mod vocabulary;

#[cfg(test)]
mod testing;

pub use engine::KnowledgeEngine;
pub use query::{detect_frameworks, detect_intents, lexical_score};
pub use ranking::{Ranking, RankingContext, RankingPipeline, ScoringStage, SeedBank};
pub use search::{MultiModalSearch, SimilaritySearch};
pub use synthesis::{AnswerRequest, AnswerSynthesizer};
