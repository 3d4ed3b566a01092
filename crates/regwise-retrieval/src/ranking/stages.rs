//! Named scoring stages. Each stage takes the candidate list and returns
//! it adjusted; only the framework filter may drop candidates.

use std::collections::HashSet;

use regwise_core::config::RankingConfig;
use regwise_core::cosine_similarity;

use super::candidate::{FrameworkMatch, RankedCandidate};
use super::framework::{matches_any_hard, matches_any_soft};
use super::RankingContext;
use crate::query::count_present;
use crate::vocabulary;

/// One step of the ranking pipeline.
pub trait ScoringStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, candidates: Vec<RankedCandidate>, ctx: &RankingContext<'_>)
        -> Vec<RankedCandidate>;
}

/// The default stage order.
pub fn default_stages(config: &RankingConfig) -> Vec<Box<dyn ScoringStage>> {
    vec![
        Box::new(Deduplicate),
        Box::new(RoleTokenBoost {
            boost: config.role_token_boost,
        }),
        Box::new(FrameworkFilter),
        Box::new(IntentKeywordBoost {
            boost: config.intent_keyword_boost,
        }),
        Box::new(SeedBoost {
            bar: config.seed_similarity_bar,
            step: config.seed_boost_step,
            cap: config.seed_boost_cap,
        }),
        Box::new(FrameworkReinforcement {
            hard_boost: config.framework_match_boost,
            soft_boost: config.soft_framework_bonus,
        }),
        Box::new(DomainDensity {
            step: config.density_step,
            cap: config.density_cap,
            off_topic_penalty: config.off_topic_penalty,
        }),
    ]
}

/// First occurrence of each chunk id wins.
pub struct Deduplicate;

impl ScoringStage for Deduplicate {
    fn name(&self) -> &'static str {
        "deduplicate"
    }

    fn apply(&self, mut candidates: Vec<RankedCandidate>, _ctx: &RankingContext<'_>) -> Vec<RankedCandidate> {
        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.chunk.id.clone()));
        candidates
    }
}

/// Boost text that uses the requested role's vocabulary.
pub struct RoleTokenBoost {
    pub boost: f64,
}

impl ScoringStage for RoleTokenBoost {
    fn name(&self) -> &'static str {
        "role_tokens"
    }

    fn apply(&self, mut candidates: Vec<RankedCandidate>, ctx: &RankingContext<'_>) -> Vec<RankedCandidate> {
        let Some(role) = ctx.role else {
            return candidates;
        };
        let tokens = vocabulary::role_tokens(role);
        if tokens.is_empty() {
            return candidates;
        }
        for c in &mut candidates {
            c.role_signal = count_present(&c.lowered_text(), tokens) > 0;
            if c.role_signal {
                c.adjust(self.name(), self.boost);
            }
        }
        candidates
    }
}

/// Restrict to hard framework matches when any exist; otherwise mark soft
/// matches and keep everything.
pub struct FrameworkFilter;

impl ScoringStage for FrameworkFilter {
    fn name(&self) -> &'static str {
        "framework_filter"
    }

    fn apply(&self, mut candidates: Vec<RankedCandidate>, ctx: &RankingContext<'_>) -> Vec<RankedCandidate> {
        if ctx.frameworks.is_empty() {
            return candidates;
        }
        let any_hard = candidates
            .iter()
            .any(|c| matches_any_hard(c.chunk.metadata.framework.as_deref(), ctx.frameworks));
        if any_hard {
            candidates.retain(|c| matches_any_hard(c.chunk.metadata.framework.as_deref(), ctx.frameworks));
            for c in &mut candidates {
                c.framework_match = FrameworkMatch::Hard;
            }
        } else {
            for c in &mut candidates {
                if matches_any_soft(c.chunk.metadata.framework.as_deref(), ctx.frameworks) {
                    c.framework_match = FrameworkMatch::Soft;
                }
            }
        }
        candidates
    }
}

/// One boost per detected intent whose keywords appear in the text.
pub struct IntentKeywordBoost {
    pub boost: f64,
}

impl ScoringStage for IntentKeywordBoost {
    fn name(&self) -> &'static str {
        "intent_keywords"
    }

    fn apply(&self, mut candidates: Vec<RankedCandidate>, ctx: &RankingContext<'_>) -> Vec<RankedCandidate> {
        if ctx.intents.is_empty() {
            return candidates;
        }
        for c in &mut candidates {
            let text = c.lowered_text();
            let hits = ctx
                .intents
                .iter()
                .filter(|&&i| count_present(&text, vocabulary::intent_keywords(i)) > 0)
                .count();
            c.adjust(self.name(), self.boost * hits as f64);
        }
        candidates
    }
}

/// Boost per seed phrase the chunk embedding is close to, capped.
pub struct SeedBoost {
    pub bar: f64,
    pub step: f64,
    pub cap: f64,
}

impl ScoringStage for SeedBoost {
    fn name(&self) -> &'static str {
        "seed_similarity"
    }

    fn apply(&self, mut candidates: Vec<RankedCandidate>, ctx: &RankingContext<'_>) -> Vec<RankedCandidate> {
        if ctx.intents.is_empty() || ctx.seeds.is_empty() {
            return candidates;
        }
        for c in &mut candidates {
            if !c.chunk.has_embedding() {
                continue;
            }
            let matching = ctx
                .intents
                .iter()
                .flat_map(|&i| ctx.seeds.for_intent(i))
                .filter(|seed| cosine_similarity(&c.chunk.embedding, seed) > self.bar)
                .count();
            let boost = (self.step * matching as f64).min(self.cap);
            c.adjust(self.name(), boost);
        }
        candidates
    }
}

/// Reinforce requested-framework matches so they win near-ties.
pub struct FrameworkReinforcement {
    pub hard_boost: f64,
    pub soft_boost: f64,
}

impl ScoringStage for FrameworkReinforcement {
    fn name(&self) -> &'static str {
        "framework_match"
    }

    fn apply(&self, mut candidates: Vec<RankedCandidate>, _ctx: &RankingContext<'_>) -> Vec<RankedCandidate> {
        for c in &mut candidates {
            let boost = match c.framework_match {
                FrameworkMatch::Hard => self.hard_boost,
                FrameworkMatch::Soft => self.soft_boost,
                FrameworkMatch::None => 0.0,
            };
            c.adjust(self.name(), boost);
        }
        candidates
    }
}

/// Reward dense coverage of the detected topic; demote chunks that belong
/// to a competing topic and carry none of the detected topic's signals.
pub struct DomainDensity {
    pub step: f64,
    pub cap: f64,
    pub off_topic_penalty: f64,
}

impl ScoringStage for DomainDensity {
    fn name(&self) -> &'static str {
        "domain_density"
    }

    fn apply(&self, mut candidates: Vec<RankedCandidate>, ctx: &RankingContext<'_>) -> Vec<RankedCandidate> {
        if ctx.intents.is_empty() {
            return candidates;
        }
        for c in &mut candidates {
            let text = c.lowered_text();
            c.density = ctx
                .intents
                .iter()
                .map(|&i| count_present(&text, vocabulary::density_signals(i)))
                .sum();
            let boost = (self.step * c.density as f64).min(self.cap);
            c.adjust(self.name(), boost);

            if c.density == 0 && is_off_topic(&text, ctx) {
                c.adjust(self.name(), -self.off_topic_penalty);
            }
        }
        candidates
    }
}

fn is_off_topic(text: &str, ctx: &RankingContext<'_>) -> bool {
    ctx.intents.iter().any(|&focus| {
        vocabulary::off_topic_for(focus).iter().any(|other| {
            !ctx.intents.contains(other) && count_present(text, vocabulary::intent_keywords(*other)) > 0
        })
    })
}
