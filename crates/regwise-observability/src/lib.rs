//! # regwise-observability
//!
//! Structured tracing with span definitions, the query log, and health
//! reporting for the knowledge base.

pub mod health;
pub mod query_log;
pub mod tracing_setup;

pub use health::{HealthReporter, HealthSnapshot};
pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::init_tracing;

// Span macros expand to `$crate::tracing::*`.
#[doc(hidden)]
pub use tracing;
