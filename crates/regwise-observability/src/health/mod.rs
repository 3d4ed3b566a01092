//! Health reporting for the knowledge base.

pub mod reporter;

pub use reporter::{HealthReporter, HealthSnapshot, MIN_HEALTHY_CONFIDENCE};
