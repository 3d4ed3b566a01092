//! Fallback chain for embedding generation.
//!
//! Providers are tried in priority order. Every fallback is recorded as a
//! `DegradationEvent` so health reporting can surface it.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Utc;
use regwise_core::errors::{EmbeddingError, RegwiseError, RegwiseResult, StoreError};
use regwise_core::models::DegradationEvent;
use regwise_core::traits::IEmbeddingProvider;
use tracing::warn;

/// Undrained events kept before the oldest are dropped.
pub const DEFAULT_EVENT_CAPACITY: usize = 1_000;

/// Ordered provider chain with an interior event log, so it can be shared
/// across threads behind `&self`.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<VecDeque<DegradationEvent>>,
    max_events: usize,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Chain whose event log holds at most `max_events` undrained events.
    pub fn with_event_capacity(max_events: usize) -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(VecDeque::new()),
            max_events: max_events.max(1),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed with the first provider that succeeds.
    ///
    /// Returns the vector and the name of the provider that produced it.
    pub fn embed(&self, text: &str) -> RegwiseResult<(Vec<f32>, &str)> {
        self.run(|p| p.embed(text))
    }

    /// Embed a batch with the first provider that succeeds for the whole batch.
    pub fn embed_batch(&self, texts: &[String]) -> RegwiseResult<(Vec<Vec<f32>>, &str)> {
        self.run(|p| p.embed_batch(texts))
    }

    fn run<T>(
        &self,
        op: impl Fn(&dyn IEmbeddingProvider) -> RegwiseResult<T>,
    ) -> RegwiseResult<(T, &str)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match op(provider.as_ref()) {
                Ok(out) => {
                    if i > 0 {
                        self.record_fallback(provider.name())?;
                    }
                    return Ok((out, provider.name()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "embedding provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: format!("all {} providers exhausted", self.chain.len()),
            }
            .into()
        }))
    }

    fn record_fallback(&self, fallback: &str) -> RegwiseResult<()> {
        let primary = self.chain.first().map(|p| p.name()).unwrap_or("unknown");
        let mut events = self.events.lock().map_err(poisoned)?;
        if events.len() == self.max_events {
            events.pop_front();
        }
        events.push_back(DegradationEvent {
            component: "embeddings".to_string(),
            failure: format!("{primary} failed"),
            fallback_used: fallback.to_string(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> RegwiseResult<Vec<DegradationEvent>> {
        let mut events = self.events.lock().map_err(poisoned)?;
        Ok(events.drain(..).collect())
    }

    /// Number of events recorded since the last drain.
    pub fn event_count(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> RegwiseError {
    StoreError::LockPoisoned {
        reason: format!("degradation log: {e}"),
    }
    .into()
}
