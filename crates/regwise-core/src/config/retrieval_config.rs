use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;
use crate::errors::{RegwiseError, RegwiseResult};

/// Search thresholds and answer-shaping limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Semantic threshold for general multi-modal search.
    pub general_threshold: f64,
    /// Semantic threshold when a role is supplied (favours recall).
    pub role_threshold: f64,
    /// Threshold for the last-chance general search.
    pub fallback_threshold: f64,
    /// Threshold used by `search_by_similarity` when the caller has no preference.
    pub default_similarity_threshold: f64,
    /// Pseudo-similarity for exact concept matches.
    pub concept_similarity: f64,
    pub max_context: usize,
    pub max_citations: usize,
    pub fallback_confidence: f64,
    pub role_base_confidence: f64,
    pub role_confidence_step: f64,
    pub role_confidence_cap: f64,
    /// Confidence when a role was supplied but no role candidate survived.
    pub role_empty_confidence: f64,
    /// Alternates listed when the winner is ambiguous.
    pub alternates_shown: usize,
    /// Max characters of alternate previews.
    pub preview_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            general_threshold: defaults::DEFAULT_GENERAL_THRESHOLD,
            role_threshold: defaults::DEFAULT_ROLE_THRESHOLD,
            fallback_threshold: defaults::DEFAULT_FALLBACK_THRESHOLD,
            default_similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            concept_similarity: constants::CONCEPT_MATCH_SIMILARITY,
            max_context: constants::MAX_CONTEXT,
            max_citations: constants::MAX_CITATIONS,
            fallback_confidence: constants::FALLBACK_CONFIDENCE,
            role_base_confidence: defaults::DEFAULT_ROLE_BASE_CONFIDENCE,
            role_confidence_step: defaults::DEFAULT_ROLE_CONFIDENCE_STEP,
            role_confidence_cap: defaults::DEFAULT_ROLE_CONFIDENCE_CAP,
            role_empty_confidence: defaults::DEFAULT_ROLE_EMPTY_CONFIDENCE,
            alternates_shown: defaults::DEFAULT_ALTERNATES_SHOWN,
            preview_chars: defaults::DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl RetrievalConfig {
    pub(crate) fn validate(&self) -> RegwiseResult<()> {
        let unit = [
            ("fallback_confidence", self.fallback_confidence),
            ("role_base_confidence", self.role_base_confidence),
            ("role_confidence_cap", self.role_confidence_cap),
            ("role_empty_confidence", self.role_empty_confidence),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(RegwiseError::ConfigError(format!(
                    "retrieval.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.max_context == 0 {
            return Err(RegwiseError::ConfigError(
                "retrieval.max_context must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
