// Embedding
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "lexicon";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = crate::constants::EMBEDDING_DIMENSIONS;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// Retrieval thresholds
pub const DEFAULT_GENERAL_THRESHOLD: f64 = 0.6;
pub const DEFAULT_ROLE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_FALLBACK_THRESHOLD: f64 = 0.2;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

// Answer confidence
pub const DEFAULT_ROLE_BASE_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_ROLE_CONFIDENCE_STEP: f64 = 0.05;
pub const DEFAULT_ROLE_CONFIDENCE_CAP: f64 = 0.95;
pub const DEFAULT_ROLE_EMPTY_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_ALTERNATES_SHOWN: usize = 3;
pub const DEFAULT_PREVIEW_CHARS: usize = 160;

// Ranking heuristics
pub const DEFAULT_ROLE_TOKEN_BOOST: f64 = 0.06;
pub const DEFAULT_SOFT_FRAMEWORK_BONUS: f64 = 0.08;
pub const DEFAULT_FRAMEWORK_MATCH_BOOST: f64 = 0.15;
pub const DEFAULT_INTENT_KEYWORD_BOOST: f64 = 0.08;
pub const DEFAULT_SEED_SIMILARITY_BAR: f64 = 0.75;
pub const DEFAULT_SEED_BOOST_STEP: f64 = 0.05;
pub const DEFAULT_SEED_BOOST_CAP: f64 = 0.10;
pub const DEFAULT_DENSITY_STEP: f64 = 0.02;
pub const DEFAULT_DENSITY_CAP: f64 = 0.10;
pub const DEFAULT_OFF_TOPIC_PENALTY: f64 = 0.05;
pub const DEFAULT_NEAR_TIE_EPSILON: f64 = 0.04;

// Ingest
pub const DEFAULT_EMBEDDED_FILE: &str = "regulatory_knowledge.embedded.jsonl";
pub const DEFAULT_EXTERNAL_CONFIDENCE: f64 = 0.9;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
