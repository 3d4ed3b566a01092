//! Query preprocessing: framework mentions, coarse intents, lexical scoring.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use regwise_core::intent::QueryIntent;
use regwise_embeddings::tokenizer::tokenize;

use crate::vocabulary;

/// Bonus when the whole query appears verbatim in the text.
const EXACT_PHRASE_BONUS: f64 = 0.3;
/// Lexical scores never reach embedding-grade certainty.
const LEXICAL_CAP: f64 = 0.9;

struct FrameworkMention {
    regex: &'static LazyLock<Option<Regex>>,
    framework: &'static str,
}

macro_rules! mention_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

mention_pattern!(RE_GDPR, r"(?i)\b(gdpr|privacy|data protection regulation)\b");
mention_pattern!(RE_AI_ACT, r"(?i)\b(eu ai act|ai act|artificial intelligence act)\b");
mention_pattern!(RE_NIS2, r"(?i)\bnis\s?2\b");
mention_pattern!(RE_DORA, r"(?i)\b(dora|digital operational resilience)\b");
mention_pattern!(RE_CRA, r"(?i)\b(cra|cyber resilience act)\b");
mention_pattern!(RE_ISO27001, r"(?i)\biso[\s/-]?(iec[\s-]?)?27001\b");
mention_pattern!(RE_ISO42001, r"(?i)\biso[\s/-]?(iec[\s-]?)?42001\b");
mention_pattern!(RE_OWASP, r"(?i)\bowasp\b");

static MENTIONS: &[FrameworkMention] = &[
    FrameworkMention { regex: &RE_GDPR, framework: "gdpr" },
    FrameworkMention { regex: &RE_AI_ACT, framework: "ai-act" },
    FrameworkMention { regex: &RE_NIS2, framework: "nis2" },
    FrameworkMention { regex: &RE_DORA, framework: "dora" },
    FrameworkMention { regex: &RE_CRA, framework: "cra" },
    FrameworkMention { regex: &RE_ISO27001, framework: "iso-27001" },
    FrameworkMention { regex: &RE_ISO42001, framework: "iso-42001" },
    FrameworkMention { regex: &RE_OWASP, framework: "owasp" },
];

/// Framework tokens mentioned in the query, in table order.
pub fn detect_frameworks(query: &str) -> Vec<String> {
    MENTIONS
        .iter()
        .filter(|m| m.regex.as_ref().is_some_and(|re| re.is_match(query)))
        .map(|m| m.framework.to_string())
        .collect()
}

/// Coarse intents of the query. An intent fires when one of its trigger
/// words is present and, for intents that need one, a qualifier too.
pub fn detect_intents(query: &str) -> Vec<QueryIntent> {
    let lower = query.to_lowercase();
    QueryIntent::ALL
        .into_iter()
        .filter(|&intent| {
            let triggered = vocabulary::intent_triggers(intent)
                .iter()
                .any(|t| lower.contains(t));
            let qualifiers = vocabulary::intent_qualifiers(intent);
            triggered && (qualifiers.is_empty() || qualifiers.iter().any(|q| lower.contains(q)))
        })
        .collect()
}

/// Word-overlap score in [0, 0.9] used when the query cannot be embedded.
pub fn lexical_score(query: &str, text: &str) -> f64 {
    let query_terms: HashSet<String> = tokenize(query).into_iter().collect();
    if query_terms.is_empty() {
        return 0.0;
    }
    let text_terms: HashSet<String> = tokenize(text).into_iter().collect();
    let overlap = query_terms.intersection(&text_terms).count() as f64 / query_terms.len() as f64;
    let phrase = query.trim().to_lowercase();
    let bonus = if !phrase.is_empty() && text.to_lowercase().contains(&phrase) {
        EXACT_PHRASE_BONUS
    } else {
        0.0
    };
    (overlap + bonus).min(LEXICAL_CAP)
}

/// Count of `terms` that occur in `lowered_text`.
pub(crate) fn count_present(lowered_text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| lowered_text.contains(*t)).count()
}
