//! Structured log events for key operations.

pub fn knowledge_loaded(source: &str, inserted: usize, rejected: usize) {
    tracing::info!(
        event = "knowledge_loaded",
        source = %source,
        inserted,
        rejected,
        "knowledge loaded"
    );
}

pub fn chunk_rejected(chunk_id: &str, reason: &str) {
    tracing::warn!(
        event = "chunk_rejected",
        chunk_id = %chunk_id,
        reason = %reason,
        "chunk rejected"
    );
}

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Emitted once per answered question.
pub fn answer_produced(best_match_id: Option<&str>, confidence: f64, citations: usize) {
    tracing::info!(
        event = "answer_produced",
        best_match_id = ?best_match_id,
        confidence,
        citations,
        "answer produced"
    );
}
