//! Everything the engine serves from, built once at startup.

use rayon::prelude::*;
use regwise_core::config::RegwiseConfig;
use regwise_core::errors::RegwiseResult;
use regwise_core::models::KnowledgeChunk;
use regwise_core::traits::IEmbeddingProvider;
use regwise_embeddings::EmbeddingEngine;
use regwise_observability::{embedding_span, ingest_span};
use regwise_observability::tracing_setup::events;
use regwise_store::{
    load_external, ChunkStore, FrameworkRegistry, RequirementStore, SampleResponseBook,
    StaticDatasets,
};
use tracing::{info, warn};

use crate::ranking::SeedBank;

pub(crate) struct Knowledge {
    pub store: ChunkStore,
    pub requirements: RequirementStore,
    pub embedder: EmbeddingEngine,
    pub seeds: SeedBank,
    pub samples: SampleResponseBook,
    pub registry: FrameworkRegistry,
}

impl Knowledge {
    /// Load datasets and external records, embed, and index.
    pub fn load(config: &RegwiseConfig, embedder: EmbeddingEngine) -> RegwiseResult<Self> {
        let _span = ingest_span!("startup").entered();

        let mut chunks = Vec::new();
        let mut requirements = RequirementStore::default();
        let mut samples = SampleResponseBook::default();
        let mut registry = FrameworkRegistry::default();
        if config.ingest.load_static_datasets {
            let datasets = StaticDatasets::load()?;
            chunks = datasets.all_chunks();
            registry = datasets.registry();
            requirements = RequirementStore::new(datasets.requirements);
            samples = SampleResponseBook::new(datasets.sample_responses);
        }

        let external = load_external(&config.ingest, config.embedding.dimensions);
        let source = external
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "static".to_string());
        chunks.extend(external.chunks);

        let chunks = embed_all(&embedder, chunks);
        let store = ChunkStore::new();
        let report = store.insert_batch(chunks)?;
        for (id, err) in &report.rejected {
            events::chunk_rejected(id, &err.to_string());
        }
        events::knowledge_loaded(
            &source,
            report.inserted,
            report.rejected_count() + external.skipped.len(),
        );

        let seeds = SeedBank::build(&embedder);
        info!(
            chunks = report.inserted,
            requirements = requirements.len(),
            seeds = seeds.len(),
            provider = embedder.active_provider(),
            "knowledge base ready"
        );

        Ok(Self {
            store,
            requirements,
            embedder,
            seeds,
            samples,
            registry,
        })
    }
}

/// Embed every chunk that has no usable embedding yet. Runs in parallel;
/// output order matches input order. A failed chunk keeps an empty
/// embedding and stays reachable by keyword and concept search.
pub(crate) fn embed_all(
    embedder: &dyn IEmbeddingProvider,
    chunks: Vec<KnowledgeChunk>,
) -> Vec<KnowledgeChunk> {
    let _span = embedding_span!(embedder.name(), chunks.len()).entered();
    chunks
        .into_par_iter()
        .map(|chunk| embed_one(embedder, chunk))
        .collect()
}

pub(crate) fn embed_one(embedder: &dyn IEmbeddingProvider, chunk: KnowledgeChunk) -> KnowledgeChunk {
    if chunk.has_embedding() {
        return chunk;
    }
    match embedder.embed(&chunk.text) {
        Ok(vector) => chunk.with_embedding(vector),
        Err(e) => {
            warn!(id = %chunk.id, error = %e, "embedding generation failed, chunk excluded from semantic search");
            chunk
        }
    }
}
