//! Query log: question, role, frameworks, intents, latency, result count,
//! best match and confidence.

use std::collections::VecDeque;
use std::time::Duration;

use regwise_core::constants::DEFAULT_QUERY_LOG_CAPACITY;
use regwise_core::intent::QueryIntent;
use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub role: Option<String>,
    pub frameworks: Vec<String>,
    pub intents: Vec<QueryIntent>,
    pub latency: Duration,
    pub result_count: usize,
    pub best_match_id: Option<String>,
    pub confidence: f64,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Create an entry with the timestamp set to now.
    pub fn new(query: impl Into<String>, latency: Duration, result_count: usize) -> Self {
        Self {
            query: query.into(),
            role: None,
            frameworks: Vec::new(),
            intents: Vec::new(),
            latency,
            result_count,
            best_match_id: None,
            confidence: 0.0,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded query log. The oldest entries are evicted first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUERY_LOG_CAPACITY)
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            role = ?entry.role,
            intents = ?entry.intents,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            best_match_id = ?entry.best_match_id,
            confidence = entry.confidence,
            "query logged"
        );
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&QueryLogEntry> {
        self.entries.back()
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0 to 1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let last = latencies.len() - 1;
        let idx = ((p.clamp(0.0, 1.0) * last as f64).round() as usize).min(last);
        latencies[idx]
    }

    /// Share of logged queries that produced no answer.
    pub fn miss_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let misses = self.entries.iter().filter(|e| e.best_match_id.is_none()).count();
        misses as f64 / self.entries.len() as f64
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
