use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{RegwiseError, RegwiseResult};

/// Heuristic constants for the ranking stages.
///
/// These are tuning values. Their ordering matters more than their exact
/// magnitude: the framework-match boost must dominate the soft bonus, and
/// every cap must be at least its step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub role_token_boost: f64,
    pub soft_framework_bonus: f64,
    pub framework_match_boost: f64,
    pub intent_keyword_boost: f64,
    pub seed_similarity_bar: f64,
    pub seed_boost_step: f64,
    pub seed_boost_cap: f64,
    pub density_step: f64,
    pub density_cap: f64,
    pub off_topic_penalty: f64,
    pub near_tie_epsilon: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            role_token_boost: defaults::DEFAULT_ROLE_TOKEN_BOOST,
            soft_framework_bonus: defaults::DEFAULT_SOFT_FRAMEWORK_BONUS,
            framework_match_boost: defaults::DEFAULT_FRAMEWORK_MATCH_BOOST,
            intent_keyword_boost: defaults::DEFAULT_INTENT_KEYWORD_BOOST,
            seed_similarity_bar: defaults::DEFAULT_SEED_SIMILARITY_BAR,
            seed_boost_step: defaults::DEFAULT_SEED_BOOST_STEP,
            seed_boost_cap: defaults::DEFAULT_SEED_BOOST_CAP,
            density_step: defaults::DEFAULT_DENSITY_STEP,
            density_cap: defaults::DEFAULT_DENSITY_CAP,
            off_topic_penalty: defaults::DEFAULT_OFF_TOPIC_PENALTY,
            near_tie_epsilon: defaults::DEFAULT_NEAR_TIE_EPSILON,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> RegwiseResult<()> {
        let non_negative = [
            ("role_token_boost", self.role_token_boost),
            ("soft_framework_bonus", self.soft_framework_bonus),
            ("framework_match_boost", self.framework_match_boost),
            ("intent_keyword_boost", self.intent_keyword_boost),
            ("seed_boost_step", self.seed_boost_step),
            ("seed_boost_cap", self.seed_boost_cap),
            ("density_step", self.density_step),
            ("density_cap", self.density_cap),
            ("off_topic_penalty", self.off_topic_penalty),
            ("near_tie_epsilon", self.near_tie_epsilon),
        ];
        for (name, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(RegwiseError::ConfigError(format!(
                    "ranking.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.seed_boost_cap < self.seed_boost_step {
            return Err(RegwiseError::ConfigError(
                "ranking.seed_boost_cap must be >= seed_boost_step".to_string(),
            ));
        }
        if self.density_cap < self.density_step {
            return Err(RegwiseError::ConfigError(
                "ranking.density_cap must be >= density_step".to_string(),
            ));
        }
        if self.framework_match_boost < self.soft_framework_bonus {
            return Err(RegwiseError::ConfigError(
                "ranking.framework_match_boost must be >= soft_framework_bonus".to_string(),
            ));
        }
        Ok(())
    }
}
