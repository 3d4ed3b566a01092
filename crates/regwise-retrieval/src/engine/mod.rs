//! KnowledgeEngine: the shared, read-mostly handle callers use.
//!
//! `start` returns immediately and loads on the blocking pool; every async
//! operation waits on the readiness channel first, so callers never see a
//! half-built index. The handle is an `Arc` passed explicitly to callers.

mod knowledge;
mod qa;

use std::sync::{Arc, Mutex, PoisonError};

use regwise_core::config::RegwiseConfig;
use regwise_core::errors::{RegwiseResult, RetrievalError, StoreError};
use regwise_core::models::{
    ChunkInput, DegradationEvent, Difficulty, HealthReport, KnowledgeChunk, KnowledgeStats,
    MultiModalResult, RankedChunk,
};
use regwise_core::traits::{IChunkStore, IEmbeddingProvider};
use regwise_embeddings::EmbeddingEngine;
use regwise_observability::tracing_setup::events;
use regwise_observability::{
    retrieval_span, HealthReporter, HealthSnapshot, QueryLog, QueryLogEntry,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::ranking::RankingPipeline;
use crate::search::{MultiModalSearch, SimilaritySearch};
use knowledge::Knowledge;

#[derive(Clone)]
enum Readiness {
    Loading,
    Ready(Arc<Knowledge>),
    Failed(String),
}

pub struct KnowledgeEngine {
    readiness: watch::Receiver<Readiness>,
    config: RegwiseConfig,
    pipeline: RankingPipeline,
    query_log: Mutex<QueryLog>,
}

impl KnowledgeEngine {
    /// Begin loading with the configured embedding provider. Must be called
    /// from within a Tokio runtime.
    pub fn start(config: RegwiseConfig) -> Arc<Self> {
        let embedder = EmbeddingEngine::new(&config.embedding);
        Self::spawn(config, embedder)
    }

    /// Begin loading with an explicit provider chain, primary first.
    pub fn start_with_providers(
        config: RegwiseConfig,
        providers: Vec<Box<dyn IEmbeddingProvider>>,
    ) -> Arc<Self> {
        let embedder = EmbeddingEngine::with_providers(&config.embedding, providers);
        Self::spawn(config, embedder)
    }

    /// Start and wait until the knowledge base is ready.
    pub async fn initialize(config: RegwiseConfig) -> RegwiseResult<Arc<Self>> {
        let engine = Self::start(config);
        engine.wait_ready().await?;
        Ok(engine)
    }

    fn spawn(config: RegwiseConfig, embedder: EmbeddingEngine) -> Arc<Self> {
        let (tx, rx) = watch::channel(Readiness::Loading);
        let engine = Arc::new(Self {
            readiness: rx,
            pipeline: RankingPipeline::new(&config.ranking, &config.retrieval),
            query_log: Mutex::new(QueryLog::with_capacity(config.observability.query_log_capacity)),
            config: config.clone(),
        });

        tokio::task::spawn_blocking(move || {
            let state = match config.validate().and_then(|()| Knowledge::load(&config, embedder)) {
                Ok(knowledge) => Readiness::Ready(Arc::new(knowledge)),
                Err(e) => {
                    warn!(error = %e, "knowledge base failed to initialize");
                    Readiness::Failed(e.to_string())
                }
            };
            tx.send_replace(state);
        });
        engine
    }

    /// Wait for loading to finish.
    pub async fn wait_ready(&self) -> RegwiseResult<()> {
        self.knowledge().await.map(|_| ())
    }

    /// Non-blocking readiness check.
    pub fn is_ready(&self) -> bool {
        matches!(*self.readiness.borrow(), Readiness::Ready(_))
    }

    pub fn config(&self) -> &RegwiseConfig {
        &self.config
    }

    async fn knowledge(&self) -> RegwiseResult<Arc<Knowledge>> {
        let mut rx = self.readiness.clone();
        let state = rx
            .wait_for(|s| !matches!(s, Readiness::Loading))
            .await
            .map_err(|_| RetrievalError::InitializationFailed {
                reason: "loader exited without reporting".to_string(),
            })?;
        match &*state {
            Readiness::Ready(k) => Ok(Arc::clone(k)),
            Readiness::Failed(reason) => Err(RetrievalError::InitializationFailed {
                reason: reason.clone(),
            }
            .into()),
            Readiness::Loading => Err(RetrievalError::InitializationFailed {
                reason: "still loading".to_string(),
            }
            .into()),
        }
    }

    // ── Search ──────────────────────────────────────────────────────────

    /// Semantic search; `None` uses the configured default threshold.
    pub async fn search_by_similarity(
        &self,
        query: &str,
        threshold: Option<f64>,
    ) -> RegwiseResult<Vec<RankedChunk>> {
        let k = self.knowledge().await?;
        let _span = retrieval_span!(query, None::<&str>).entered();
        let threshold = threshold.unwrap_or(self.config.retrieval.default_similarity_threshold);
        SimilaritySearch::new(&k.store, &k.embedder).search(query, threshold)
    }

    /// Semantic, keyword and concept branches at the general threshold.
    pub async fn search_intelligent(
        &self,
        query: &str,
        role: Option<&str>,
    ) -> RegwiseResult<MultiModalResult> {
        let k = self.knowledge().await?;
        let _span = retrieval_span!(query, role).entered();
        Ok(self.multimodal(&k).search(query, role))
    }

    fn multimodal<'k>(&'k self, k: &'k Knowledge) -> MultiModalSearch<'k> {
        MultiModalSearch::new(&k.store, &k.requirements, &k.embedder, &self.config.retrieval)
    }

    // ── Store ───────────────────────────────────────────────────────────

    /// Embed and insert one chunk. An embedding failure still inserts the
    /// chunk; only a rejected insert is an error.
    pub async fn add_knowledge_chunk(&self, input: ChunkInput) -> RegwiseResult<()> {
        let k = self.knowledge().await?;
        let chunk = knowledge::embed_one(&k.embedder, KnowledgeChunk::from(input));
        let (id, embedded) = (chunk.id.clone(), chunk.has_embedding());
        k.store.insert(chunk)?;
        info!(id = %id, embedded, "knowledge chunk added");
        Ok(())
    }

    /// Remove a chunk. Its id cannot be reused.
    pub async fn retract(&self, id: &str) -> RegwiseResult<Option<Arc<KnowledgeChunk>>> {
        self.knowledge().await?.store.retract(id)
    }

    pub async fn get_chunk(&self, id: &str) -> RegwiseResult<Option<Arc<KnowledgeChunk>>> {
        self.knowledge().await?.store.get(id)
    }

    pub async fn get_chunks_by_framework(&self, framework: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.knowledge().await?.store.by_framework(framework)
    }

    pub async fn get_chunks_by_role(&self, role: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.knowledge().await?.store.by_role(role)
    }

    pub async fn get_chunks_by_jurisdiction(&self, code: &str) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.knowledge().await?.store.by_jurisdiction(code)
    }

    pub async fn get_chunks_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> RegwiseResult<Vec<Arc<KnowledgeChunk>>> {
        self.knowledge().await?.store.by_difficulty(difficulty)
    }

    pub async fn stats(&self) -> RegwiseResult<KnowledgeStats> {
        self.knowledge().await?.store.stats()
    }

    // ── Health & query log ──────────────────────────────────────────────

    /// Does not wait: while loading the report says embeddings are generating,
    /// and after a failed load it carries the failure reason.
    pub fn health(&self) -> RegwiseResult<HealthReport> {
        let state = self.readiness.borrow().clone();
        let snapshot = match state {
            Readiness::Ready(k) => HealthSnapshot {
                stats: k.store.stats()?,
                initialized: true,
                failure: None,
                degradation_events: k.embedder.degradation_count(),
            },
            Readiness::Loading => HealthSnapshot::default(),
            Readiness::Failed(reason) => HealthSnapshot {
                failure: Some(reason),
                ..Default::default()
            },
        };
        Ok(HealthReporter::build(&snapshot))
    }

    /// Take the embedding fallbacks recorded since the last call, logging each.
    pub async fn drain_degradation_events(&self) -> RegwiseResult<Vec<DegradationEvent>> {
        let drained = self.knowledge().await?.embedder.drain_degradation_events()?;
        for e in &drained {
            events::degradation_triggered(&e.component, &e.failure, &e.fallback_used);
        }
        Ok(drained)
    }

    /// Most recent answered questions, newest last.
    pub fn recent_queries(&self, limit: usize) -> RegwiseResult<Vec<QueryLogEntry>> {
        let log = self.query_log.lock().map_err(log_poisoned)?;
        let skip = log.count().saturating_sub(limit);
        Ok(log.entries().skip(skip).cloned().collect())
    }

    /// Fraction of logged questions that fell back to "could not find".
    pub fn miss_rate(&self) -> RegwiseResult<f64> {
        Ok(self.query_log.lock().map_err(log_poisoned)?.miss_rate())
    }

    fn record_query(&self, entry: QueryLogEntry) {
        match self.query_log.lock() {
            Ok(mut log) => log.record(entry),
            Err(e) => warn!(error = %e, "query log unavailable"),
        }
    }
}

fn log_poisoned<T>(e: PoisonError<T>) -> regwise_core::errors::RegwiseError {
    StoreError::LockPoisoned {
        reason: format!("query log: {e}"),
    }
    .into()
}
