//! Requested-framework matching.

use regwise_core::models::normalize_label;

/// Minimum length for a requested token to count in a soft match.
const SOFT_TOKEN_MIN_LEN: usize = 3;

/// Hard match: the chunk framework equals, contains, or is a versioned
/// variant of the requested one. Also tolerant of separators, so
/// `iso27001` matches `iso-27001-2022`.
pub fn is_hard_match(chunk_framework: &str, requested: &str) -> bool {
    let chunk = chunk_framework.trim().to_lowercase();
    let wanted = requested.trim().to_lowercase();
    if chunk.is_empty() || wanted.is_empty() {
        return false;
    }
    chunk == wanted
        || chunk.contains(&wanted)
        || chunk.starts_with(&format!("{wanted}-"))
        || normalize_label(&chunk).contains(&normalize_label(&wanted))
}

/// Soft match: a token of the request (split on separators) appears in the
/// chunk framework, or the chunk's family prefix appears in the request.
pub fn is_soft_match(chunk_framework: &str, requested: &str) -> bool {
    let chunk = chunk_framework.trim().to_lowercase();
    let wanted = requested.trim().to_lowercase();
    if chunk.is_empty() || wanted.is_empty() {
        return false;
    }
    let token_hit = wanted
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= SOFT_TOKEN_MIN_LEN)
        .any(|t| chunk.contains(t));
    let family_hit = chunk
        .split('-')
        .next()
        .filter(|f| f.len() >= SOFT_TOKEN_MIN_LEN)
        .is_some_and(|f| wanted.contains(f));
    token_hit || family_hit
}

pub fn matches_any_hard(chunk_framework: Option<&str>, requested: &[String]) -> bool {
    chunk_framework.is_some_and(|f| requested.iter().any(|r| is_hard_match(f, r)))
}

pub fn matches_any_soft(chunk_framework: Option<&str>, requested: &[String]) -> bool {
    chunk_framework.is_some_and(|f| requested.iter().any(|r| is_soft_match(f, r)))
}
