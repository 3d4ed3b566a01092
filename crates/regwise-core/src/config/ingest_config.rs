use serde::{Deserialize, Serialize};

use super::defaults;

/// Chunk source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Candidate directories for external records; the first that exists wins.
    pub external_dirs: Vec<String>,
    /// Preferred line-delimited file inside the external directory.
    pub embedded_file: String,
    /// Confidence assigned to external records that carry none.
    pub external_default_confidence: f64,
    /// Load the compiled-in framework datasets at startup.
    pub load_static_datasets: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            external_dirs: Vec::new(),
            embedded_file: defaults::DEFAULT_EMBEDDED_FILE.to_string(),
            external_default_confidence: defaults::DEFAULT_EXTERNAL_CONFIDENCE,
            load_static_datasets: true,
        }
    }
}
