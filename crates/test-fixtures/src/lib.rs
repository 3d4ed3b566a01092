//! Fixture loader for regwise golden scenarios and sample external sources.
//!
//! Paths are relative to the `test-fixtures` directory, found by walking up
//! from the calling crate's manifest directory.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the fixtures.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // From crates/<name> the sibling crates/test-fixtures is found one level up;
    // from crates/test-fixtures itself the same directory is found.
    while !path.join("test-fixtures").join("golden").is_dir() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Absolute path to a fixture file or directory.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// All JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().join("golden").is_dir());
    }

    #[test]
    fn golden_retrieval_files_exist() {
        let files = [
            "golden/retrieval/owasp_crypto_developer.json",
            "golden/retrieval/nis2_incident_report.json",
            "golden/retrieval/duplicate_chunk_id.json",
            "golden/retrieval/empty_store.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn golden_files_parse_as_json() {
        let files = list_fixtures("golden/retrieval");
        assert_eq!(files.len(), 4);
        for file in &files {
            let content = std::fs::read_to_string(file)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
            let value: serde_json::Value = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
            assert!(value["description"].is_string(), "{} has no description", file.display());
        }
    }

    #[test]
    fn fixture_values_are_addressable() {
        let value = load_fixture_value("golden/retrieval/empty_store.json");
        assert_eq!(value["expected"]["confidence"], 0.3);
        assert!(fixture_exists("external/regulatory_knowledge.embedded.jsonl"));
        assert!(!fixture_exists("golden/retrieval/missing.json"));
    }

    #[test]
    fn external_source_has_one_malformed_line() {
        let path = fixture_path("external/regulatory_knowledge.embedded.jsonl");
        let content = std::fs::read_to_string(&path).unwrap();
        let bad = content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .filter(|l| serde_json::from_str::<serde_json::Value>(l).is_err())
            .count();
        assert_eq!(bad, 1);
    }
}
