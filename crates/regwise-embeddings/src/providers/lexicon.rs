//! Regulatory lexicon provider.
//!
//! The first buckets of every vector hold topical category features
//! (cryptography, incident handling, access control, ...); the remaining
//! buckets hold hashed terms. Category features let paraphrases such as
//! "encryption" and "TLS" land near each other without a neural model.

use std::collections::HashMap;

use regwise_core::errors::RegwiseResult;
use regwise_core::traits::IEmbeddingProvider;

use crate::tokenizer::{hash_term, l2_normalize, tokenize};

/// Weight of one category hit relative to one term occurrence.
const CATEGORY_WEIGHT: f32 = 3.0;

/// Category name and the lowercase patterns that signal it.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "crypto",
        &[
            "crypt", "cipher", "tls", "aes", "rsa", "key management", "key rotation",
            "certificate", "hashing", "kms", "hsm",
        ],
    ),
    (
        "access",
        &[
            "access control", "authoriz", "privilege", "rbac", "authenticat", "mfa",
            "permission", "identity",
        ],
    ),
    (
        "incident",
        &[
            "incident", "breach", "notif", "csirt", "early warning", "competent authorit",
            "24 hours", "72 hours",
        ],
    ),
    (
        "vulnerability",
        &["vulnerab", "patch", "cve", "disclosure", "sbom", "exploit", "security update"],
    ),
    (
        "third_party",
        &["third-party", "third party", "vendor", "supplier", "outsourc", "ict provider", "contract"],
    ),
    (
        "data_protection",
        &["personal data", "privacy", "gdpr", "data subject", "consent", "data protection"],
    ),
    (
        "ai",
        &["ai system", "artificial intelligence", "high-risk", "llm", "prompt", "machine learning", "model"],
    ),
    (
        "governance",
        &["governance", "board", "oversight", "policy", "policies", "management body", "accountab"],
    ),
    ("risk", &["risk assessment", "risk management", "risk", "threat"]),
    (
        "audit",
        &["audit", "evidence", "documentation", "record", "conformity", "logging"],
    ),
    (
        "development",
        &["code", "develop", "ci/cd", "pipeline", "library", "libraries", "tests", "implement", "config"],
    ),
    (
        "product",
        &["roadmap", "release", "acceptance criteria", "sla", "backlog", "feature"],
    ),
    (
        "resilience",
        &["resilien", "continuity", "backup", "recovery", "availability"],
    ),
    (
        "injection",
        &["injection", "sanitiz", "input validation", "xss", "sql"],
    ),
];

/// Lexicon-based embedding provider. Deterministic and always available.
pub struct RegulatoryLexicon {
    dimensions: usize,
}

impl RegulatoryLexicon {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Number of leading buckets reserved for category features.
    pub fn category_buckets(&self) -> usize {
        CATEGORIES.len().min(self.dimensions)
    }

    fn lexicon_vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }

        let lowered = text.to_lowercase();
        let cat_buckets = self.category_buckets();
        for (i, (_, patterns)) in CATEGORIES.iter().enumerate().take(cat_buckets) {
            let hits = patterns.iter().filter(|p| lowered.contains(*p)).count();
            vec[i] = hits as f32 * CATEGORY_WEIGHT;
        }

        let term_buckets = self.dimensions - cat_buckets;
        if term_buckets > 0 {
            let mut tf: HashMap<String, f32> = HashMap::new();
            for tok in tokenize(text) {
                *tf.entry(tok).or_default() += 1.0;
            }
            for (term, count) in &tf {
                let idf = 1.0 + (term.len() as f32).ln();
                vec[cat_buckets + hash_term(term, term_buckets)] += count.sqrt() * idf;
            }
        }

        l2_normalize(&mut vec);
        vec
    }
}

impl IEmbeddingProvider for RegulatoryLexicon {
    fn embed(&self, text: &str) -> RegwiseResult<Vec<f32>> {
        Ok(self.lexicon_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> RegwiseResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.lexicon_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "regulatory-lexicon"
    }

    fn is_available(&self) -> bool {
        true
    }
}
