//! Final ordering: score, then a near-tie preference for role-first text.

use super::candidate::RankedCandidate;
use crate::vocabulary::canonical_role;

/// Stable sort by score descending; merge order breaks exact ties.
pub(crate) fn sort_by_score(candidates: &mut [RankedCandidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.order.cmp(&b.order)));
}

/// Among candidates within `epsilon` of the leader, promote the one that
/// is phrased for the role first, then the one with the higher domain
/// density. Expects `candidates` already sorted by score.
pub(crate) fn promote_near_tie(candidates: &mut [RankedCandidate], role: Option<&str>, epsilon: f64) {
    let Some(top) = candidates.first().map(|c| c.score) else {
        return;
    };
    let window = candidates
        .iter()
        .take_while(|c| top - c.score <= epsilon)
        .count();
    if window < 2 {
        return;
    }

    let key = |c: &RankedCandidate| {
        let role_first = role.is_some_and(|r| is_role_first(&c.chunk.text, r));
        (role_first, c.density)
    };
    let mut best = 0;
    for i in 1..window {
        if key(&candidates[i]) > key(&candidates[best]) {
            best = i;
        }
    }
    if best > 0 {
        candidates[..=best].rotate_right(1);
    }
}

/// Whether `text` opens by addressing `role`, e.g. "Developer: ...",
/// "Product Manager acceptance criteria ...", "As a developer, ...".
pub fn is_role_first(text: &str, role: &str) -> bool {
    let lowered = text.trim_start().to_lowercase();
    let mut names = vec![role.trim().to_lowercase()];
    if let Some(canonical) = canonical_role(role) {
        if !names.iter().any(|n| n == canonical) {
            names.push(canonical.to_string());
        }
    }
    names.iter().filter(|n| !n.is_empty()).any(|name| {
        [
            format!("{name}:"),
            format!("{name} acceptance criteria"),
            format!("as a {name}"),
            format!("as an {name}"),
            format!("as {name}"),
        ]
        .iter()
        .any(|prefix| lowered.starts_with(prefix.as_str()))
    })
}
