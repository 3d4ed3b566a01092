//! Aggregate health report generation.

use regwise_core::models::{EmbeddingStatus, HealthReport, HealthStatus, KnowledgeStats};

/// Average confidence below which the knowledge base is flagged.
pub const MIN_HEALTHY_CONFIDENCE: f64 = 0.9;

/// Inputs for a health report.
#[derive(Debug, Clone, Default)]
pub struct HealthSnapshot {
    pub stats: KnowledgeStats,
    /// Whether startup loading has finished.
    pub initialized: bool,
    /// Why startup loading failed, if it did.
    pub failure: Option<String>,
    pub degradation_events: usize,
}

/// Builds a [`HealthReport`] from a snapshot.
pub struct HealthReporter;

impl HealthReporter {
    pub fn build(snapshot: &HealthSnapshot) -> HealthReport {
        let stats = &snapshot.stats;
        let embedding_status = Self::embedding_status(snapshot);
        let (status, message) = if let Some(reason) = &snapshot.failure {
            (HealthStatus::Critical, format!("initialization failed: {reason}"))
        } else if stats.total_chunks == 0 {
            (HealthStatus::Critical, "knowledge base is empty".to_string())
        } else if stats.total_embeddings < stats.total_chunks {
            (
                HealthStatus::Warning,
                format!(
                    "{} of {} chunks have embeddings",
                    stats.total_embeddings, stats.total_chunks
                ),
            )
        } else if stats.avg_confidence < MIN_HEALTHY_CONFIDENCE {
            (
                HealthStatus::Warning,
                format!("average confidence {:.2} is low", stats.avg_confidence),
            )
        } else {
            (
                HealthStatus::Healthy,
                format!(
                    "{} chunks across {} frameworks",
                    stats.total_chunks,
                    stats.frameworks.len()
                ),
            )
        };
        HealthReport {
            status,
            message,
            embedding_status,
            stats: stats.clone(),
            degradation_events: snapshot.degradation_events,
        }
    }

    /// Failed if startup failed, Generating until it finishes, then Ready
    /// only if every chunk is embedded.
    fn embedding_status(snapshot: &HealthSnapshot) -> EmbeddingStatus {
        if snapshot.failure.is_some() {
            EmbeddingStatus::Failed
        } else if !snapshot.initialized {
            EmbeddingStatus::Generating
        } else if snapshot.stats.total_embeddings >= snapshot.stats.total_chunks {
            EmbeddingStatus::Ready
        } else {
            EmbeddingStatus::Failed
        }
    }
}
