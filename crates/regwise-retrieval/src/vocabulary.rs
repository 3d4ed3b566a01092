//! Static vocabularies used by query preprocessing and ranking.

use regwise_core::intent::QueryIntent;
use regwise_core::models::normalize_label;

/// Canonical role name -> tokens expected in on-topic text for that role.
const ROLE_TOKENS: &[(&str, &[&str])] = &[
    ("ciso", &["governance", "risk", "board", "audit", "oversight", "policy"]),
    ("product manager", &["roadmap", "release", "acceptance", "sla", "vendor"]),
    (
        "developer",
        &["code", "implement", "ci/cd", "config", "library", "tests", "encryption", "key rotation"],
    ),
    (
        "compliance officer",
        &["audit", "evidence", "documentation", "mapping", "conformity"],
    ),
];

/// Normalized alias -> canonical role name.
const ROLE_ALIASES: &[(&str, &str)] = &[
    ("ciso", "ciso"),
    ("chiefinformationsecurityofficer", "ciso"),
    ("productmanager", "product manager"),
    ("pm", "product manager"),
    ("productowner", "product manager"),
    ("developer", "developer"),
    ("dev", "developer"),
    ("engineer", "developer"),
    ("softwareengineer", "developer"),
    ("complianceofficer", "compliance officer"),
    ("compliance", "compliance officer"),
];

/// Canonical role for a caller-supplied role name, if it is one we know.
pub fn canonical_role(role: &str) -> Option<&'static str> {
    let key = normalize_label(role);
    ROLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Vocabulary tokens for a role; empty for unknown roles.
pub fn role_tokens(role: &str) -> &'static [&'static str] {
    canonical_role(role)
        .and_then(|c| ROLE_TOKENS.iter().find(|(name, _)| *name == c))
        .map(|(_, tokens)| *tokens)
        .unwrap_or(&[])
}

/// Words in the query that trigger an intent.
pub fn intent_triggers(intent: QueryIntent) -> &'static [&'static str] {
    match intent {
        QueryIntent::Crypto => &[
            "cryptograph", "encrypt", "crypto", "cipher", "tls", "key management", "key rotation",
        ],
        QueryIntent::IncidentReporting => &["incident", "breach", "notify", "notification"],
        QueryIntent::AccessControl => &[
            "access control", "authorization", "authorisation", "privilege", "permission", "rbac",
        ],
        QueryIntent::VulnerabilityHandling => &[
            "vulnerab", "patch", "cve", "disclosure", "sbom", "security update",
        ],
        QueryIntent::ThirdPartyResilience => &[
            "third-party", "third party", "vendor", "supplier", "outsourc", "ict provider",
        ],
    }
}

/// Some intents need a second signal in the query before they fire.
/// Incident reporting needs a reporting verb or a framework name.
pub fn intent_qualifiers(intent: QueryIntent) -> &'static [&'static str] {
    match intent {
        QueryIntent::IncidentReporting => &[
            "report", "notif", "deadline", "timeline", "nis2", "dora", "gdpr", "authorit",
        ],
        _ => &[],
    }
}

/// Keywords rewarded in candidate text when the intent is detected.
pub fn intent_keywords(intent: QueryIntent) -> &'static [&'static str] {
    match intent {
        QueryIntent::Crypto => &["tls", "kms", "rotation", "certificate", "aes", "encryption"],
        QueryIntent::IncidentReporting => &[
            "notification", "24 hours", "72 hours", "competent authority", "early warning", "csirt",
        ],
        QueryIntent::AccessControl => &["least privilege", "rbac", "deny by default", "authorization"],
        QueryIntent::VulnerabilityHandling => &["patch", "cve", "disclosure", "sbom", "security update"],
        QueryIntent::ThirdPartyResilience => &["exit strategy", "register", "sla", "audit rights", "concentration"],
    }
}

/// Canonical phrases embedded once and compared to candidate embeddings.
pub fn seed_phrases(intent: QueryIntent) -> &'static [&'static str] {
    match intent {
        QueryIntent::Crypto => &[
            "key rotation and key management",
            "TLS encryption in transit",
            "encryption at rest with AES-256",
        ],
        QueryIntent::IncidentReporting => &[
            "competent authority notification",
            "early warning within 24 hours",
            "incident notification within 72 hours",
        ],
        QueryIntent::AccessControl => &["least privilege access control", "role-based authorization"],
        QueryIntent::VulnerabilityHandling => &[
            "coordinated vulnerability disclosure",
            "security updates and patching",
        ],
        QueryIntent::ThirdPartyResilience => &[
            "third-party ICT provider oversight",
            "vendor exit strategy",
        ],
    }
}

/// Domain signal words counted for density scoring. Only intents with a
/// rich signal vocabulary take part.
pub fn density_signals(intent: QueryIntent) -> &'static [&'static str] {
    match intent {
        QueryIntent::Crypto => &[
            "encrypt", "tls", "aes", "rsa", "key management", "key rotation", "kms", "hsm",
            "certificate", "cipher", "hash",
        ],
        QueryIntent::IncidentReporting => &[
            "incident", "notification", "report", "24 hours", "72 hours", "csirt",
            "competent authority", "early warning",
        ],
        _ => &[],
    }
}

/// Intents whose chunks are off-topic when `intent` is the query's focus.
pub fn off_topic_for(intent: QueryIntent) -> &'static [QueryIntent] {
    match intent {
        QueryIntent::Crypto => &[QueryIntent::IncidentReporting],
        QueryIntent::IncidentReporting => &[QueryIntent::Crypto],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_roles() {
        assert_eq!(canonical_role("Dev"), Some("developer"));
        assert_eq!(canonical_role("Product_Manager"), Some("product manager"));
        assert_eq!(canonical_role("CISO"), Some("ciso"));
        assert_eq!(canonical_role("astronaut"), None);
    }

    #[test]
    fn role_tokens_for_known_and_unknown_roles() {
        assert!(role_tokens("developer").contains(&"key rotation"));
        assert!(role_tokens("Compliance Officer").contains(&"evidence"));
        assert!(role_tokens("astronaut").is_empty());
    }

    #[test]
    fn every_intent_has_seeds_and_keywords() {
        for intent in QueryIntent::ALL {
            assert!(!seed_phrases(intent).is_empty());
            assert!(!intent_keywords(intent).is_empty());
            assert!(!intent_triggers(intent).is_empty());
        }
    }
}
