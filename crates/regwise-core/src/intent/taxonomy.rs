use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse topical classification of a question, used to target
/// domain-specific ranking boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    Crypto,
    IncidentReporting,
    AccessControl,
    VulnerabilityHandling,
    ThirdPartyResilience,
}

impl QueryIntent {
    /// Total number of intent types.
    pub const COUNT: usize = 5;

    /// All variants for iteration.
    pub const ALL: [QueryIntent; 5] = [
        Self::Crypto,
        Self::IncidentReporting,
        Self::AccessControl,
        Self::VulnerabilityHandling,
        Self::ThirdPartyResilience,
    ];

    /// Stable snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crypto => "crypto",
            Self::IncidentReporting => "incident_reporting",
            Self::AccessControl => "access_control",
            Self::VulnerabilityHandling => "vulnerability_handling",
            Self::ThirdPartyResilience => "third_party_resilience",
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_variant_once() {
        let mut seen = std::collections::HashSet::new();
        for intent in QueryIntent::ALL {
            assert!(seen.insert(intent));
        }
        assert_eq!(seen.len(), QueryIntent::COUNT);
    }

    #[test]
    fn serde_uses_snake_case_labels() {
        let json = serde_json::to_string(&QueryIntent::IncidentReporting).unwrap();
        assert_eq!(json, "\"incident_reporting\"");
        assert_eq!(QueryIntent::IncidentReporting.to_string(), "incident_reporting");
    }
}
