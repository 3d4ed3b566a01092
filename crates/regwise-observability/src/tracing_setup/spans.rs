//! Span definitions per operation: retrieval, ranking, embedding, ingest.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $role:expr) => {
        $crate::tracing::info_span!("regwise.retrieval", query = %$query, role = ?$role)
    };
}

/// Create a ranking span.
#[macro_export]
macro_rules! ranking_span {
    ($candidates:expr) => {
        $crate::tracing::debug_span!("regwise.ranking", candidates = $candidates)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $count:expr) => {
        $crate::tracing::info_span!("regwise.embedding", provider = %$provider, count = $count)
    };
}

/// Create an ingest span.
#[macro_export]
macro_rules! ingest_span {
    ($source:expr) => {
        $crate::tracing::info_span!("regwise.ingest", source = %$source)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "regwise.retrieval";
    pub const RANKING: &str = "regwise.ranking";
    pub const EMBEDDING: &str = "regwise.embedding";
    pub const INGEST: &str = "regwise.ingest";
}
