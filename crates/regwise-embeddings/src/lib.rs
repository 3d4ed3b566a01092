//! # regwise-embeddings
//!
//! Text-to-vector providers for chunk and query embedding.
//!
//! Providers are deterministic and local: the default regulatory lexicon
//! provider mixes topical category features with hashed terms, and the
//! TF-IDF provider is the always-available fallback. The `EmbeddingEngine`
//! wraps both behind a degradation chain and a content-hash cache.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;
pub mod tokenizer;

pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
pub use providers::{RegulatoryLexicon, TfIdfFallback};
