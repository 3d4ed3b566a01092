/// Platform-wide embedding dimensionality.
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Maximum number of chunks returned as answer context.
pub const MAX_CONTEXT: usize = 5;

/// Maximum number of distinct framework citations per answer.
pub const MAX_CITATIONS: usize = 3;

/// Confidence attached to the "could not find" answer.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Pseudo-similarity assigned to exact concept matches.
pub const CONCEPT_MATCH_SIMILARITY: f64 = 0.8;

/// Framework label used when a chunk's framework cannot be determined.
pub const UNKNOWN_FRAMEWORK: &str = "unknown";

/// Prefix for ids generated for external records that carry none.
pub const GENERATED_ID_PREFIX: &str = "ext-";

/// Default query log capacity (ring buffer).
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;

/// Crate version, for health output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
