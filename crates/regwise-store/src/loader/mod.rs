//! External chunk sources.
//!
//! The first configured directory that exists is used. Inside it the
//! line-delimited embedded file is preferred; without it every `*.json`
//! file holding an array of records is read instead. Bad records are
//! logged and skipped so one broken line never blocks startup.

mod record;

use std::fs;
use std::path::{Path, PathBuf};

use regwise_core::config::IngestConfig;
use regwise_core::errors::IngestError;
use regwise_core::models::KnowledgeChunk;
use tracing::{debug, info, warn};

use record::ExternalRecord;
pub use record::infer_framework;

/// Result of reading an external source.
#[derive(Debug, Default)]
pub struct ExternalLoad {
    pub chunks: Vec<KnowledgeChunk>,
    /// Records or files that could not be read.
    pub skipped: Vec<IngestError>,
    /// Directory the records came from, if any existed.
    pub source: Option<PathBuf>,
}

impl ExternalLoad {
    fn skip(&mut self, err: IngestError) {
        warn!(error = %err, "external record skipped");
        self.skipped.push(err);
    }
}

/// Load external records. Never fails: missing directories yield an empty
/// load and unreadable input is reported in `skipped`.
pub fn load_external(config: &IngestConfig, dimensions: usize) -> ExternalLoad {
    let Some(dir) = config
        .external_dirs
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_dir())
    else {
        debug!(candidates = config.external_dirs.len(), "no external source directory found");
        return ExternalLoad::default();
    };

    let mut load = ExternalLoad {
        source: Some(dir.clone()),
        ..Default::default()
    };
    let embedded = dir.join(&config.embedded_file);
    if embedded.is_file() {
        read_jsonl(&embedded, config, dimensions, &mut load);
    } else {
        for path in json_files(&dir, &mut load) {
            read_json_array(&path, config, dimensions, &mut load);
        }
    }
    info!(
        source = %dir.display(),
        loaded = load.chunks.len(),
        skipped = load.skipped.len(),
        "external knowledge loaded"
    );
    load
}

fn read_jsonl(path: &Path, config: &IngestConfig, dimensions: usize, load: &mut ExternalLoad) {
    let Some(raw) = read_file(path, load) else {
        return;
    };
    let source_name = path.display().to_string();
    for (i, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<ExternalRecord>(line).map_err(|e| e.to_string());
        push_record(parsed, &source_name, i + 1, config, dimensions, load);
    }
}

fn read_json_array(path: &Path, config: &IngestConfig, dimensions: usize, load: &mut ExternalLoad) {
    let Some(raw) = read_file(path, load) else {
        return;
    };
    let source_name = path.display().to_string();
    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            load.skip(IngestError::MalformedRecord {
                source_name,
                line: 0,
                reason: format!("expected a JSON array: {e}"),
            });
            return;
        }
    };
    for (i, value) in values.into_iter().enumerate() {
        let parsed = serde_json::from_value::<ExternalRecord>(value).map_err(|e| e.to_string());
        push_record(parsed, &source_name, i + 1, config, dimensions, load);
    }
}

fn push_record(
    parsed: Result<ExternalRecord, String>,
    source_name: &str,
    line: usize,
    config: &IngestConfig,
    dimensions: usize,
    load: &mut ExternalLoad,
) {
    match parsed.and_then(|r| r.into_chunk(dimensions, config.external_default_confidence)) {
        Ok(chunk) => load.chunks.push(chunk),
        Err(reason) => load.skip(IngestError::MalformedRecord {
            source_name: source_name.to_string(),
            line,
            reason,
        }),
    }
}

fn read_file(path: &Path, load: &mut ExternalLoad) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(e) => {
            load.skip(IngestError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
            None
        }
    }
}

/// `*.json` files in `dir`, sorted by name.
fn json_files(dir: &Path, load: &mut ExternalLoad) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            load.skip(IngestError::Io {
                path: dir.display().to_string(),
                reason: e.to_string(),
            });
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(dirs: &[&Path]) -> IngestConfig {
        IngestConfig {
            external_dirs: dirs.iter().map(|d| d.display().to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_directories_yield_empty_load() {
        let load = load_external(&config_for(&[Path::new("/nonexistent/regwise")]), 4);
        assert!(load.chunks.is_empty());
        assert!(load.skipped.is_empty());
        assert!(load.source.is_none());
    }

    #[test]
    fn jsonl_bad_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let body = concat!(
            r#"{"id":"nis2-ext-1","coreDescription":"Report significant incidents."}"#,
            "\n\n",
            "{not json\n",
            r#"{"id":"nis2-ext-2"}"#,
            "\n",
            r#"{"id":"dora-ext-1","coreDescription":"Test ICT resilience."}"#,
            "\n",
        );
        fs::write(dir.path().join("regulatory_knowledge.embedded.jsonl"), body).unwrap();

        let load = load_external(&config_for(&[Path::new("/nonexistent"), dir.path()]), 4);
        assert_eq!(load.source.as_deref(), Some(dir.path()));
        let ids: Vec<_> = load.chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["nis2-ext-1", "dora-ext-1"]);
        assert_eq!(load.skipped.len(), 2);
        assert!(matches!(
            load.skipped[0],
            IngestError::MalformedRecord { line: 3, .. }
        ));
    }

    #[test]
    fn json_arrays_used_without_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b.json"),
            r#"[{"id":"cra-1","text":"Ship security updates.","metadata":{"targetRoles":["developer"]}}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id":"gdpr-1","text":"Encrypt personal data.","metadata":{"framework":"gdpr-2018"}}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let load = load_external(&config_for(&[dir.path()]), 4);
        let ids: Vec<_> = load.chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["gdpr-1", "cra-1"]);
        assert_eq!(load.chunks[0].metadata.framework.as_deref(), Some("gdpr-2018"));
        assert_eq!(load.chunks[1].metadata.framework.as_deref(), Some("cra-2024"));
        assert_eq!(
            load.chunks[1].metadata.target_roles.as_deref(),
            Some(&["developer".to_string()][..])
        );
    }

    #[test]
    fn json_file_that_is_not_an_array_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), r#"{"id":"x"}"#).unwrap();
        let load = load_external(&config_for(&[dir.path()]), 4);
        assert!(load.chunks.is_empty());
        assert_eq!(load.skipped.len(), 1);
    }
}
