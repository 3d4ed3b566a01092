use regwise_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = RegwiseConfig::from_toml("").unwrap();

    // Embedding defaults
    assert_eq!(config.embedding.provider, "lexicon");
    assert_eq!(config.embedding.dimensions, 384);
    assert_eq!(config.embedding.l1_cache_size, 10_000);

    // Retrieval defaults
    assert_eq!(config.retrieval.general_threshold, 0.6);
    assert_eq!(config.retrieval.role_threshold, 0.1);
    assert_eq!(config.retrieval.fallback_threshold, 0.2);
    assert_eq!(config.retrieval.concept_similarity, 0.8);
    assert_eq!(config.retrieval.max_context, 5);
    assert_eq!(config.retrieval.max_citations, 3);
    assert_eq!(config.retrieval.fallback_confidence, 0.3);

    // Ranking defaults
    assert_eq!(config.ranking.role_token_boost, 0.06);
    assert_eq!(config.ranking.soft_framework_bonus, 0.08);
    assert_eq!(config.ranking.framework_match_boost, 0.15);
    assert_eq!(config.ranking.seed_similarity_bar, 0.75);
    assert_eq!(config.ranking.seed_boost_cap, 0.10);
    assert_eq!(config.ranking.density_step, 0.02);
    assert_eq!(config.ranking.density_cap, 0.10);
    assert_eq!(config.ranking.near_tie_epsilon, 0.04);

    // Ingest defaults
    assert!(config.ingest.load_static_datasets);
    assert!(config.ingest.external_dirs.is_empty());
    assert_eq!(
        config.ingest.embedded_file,
        "regulatory_knowledge.embedded.jsonl"
    );

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[retrieval]
general_threshold = 0.5
max_context = 3

[ranking]
near_tie_epsilon = 0.03
"#;
    let config = RegwiseConfig::from_toml(toml).unwrap();
    assert_eq!(config.retrieval.general_threshold, 0.5);
    assert_eq!(config.retrieval.max_context, 3);
    assert_eq!(config.ranking.near_tie_epsilon, 0.03);
    // Non-overridden fields keep defaults
    assert_eq!(config.retrieval.role_threshold, 0.1);
    assert_eq!(config.ranking.framework_match_boost, 0.15);
}

#[test]
fn config_rejects_negative_boost() {
    let err = RegwiseConfig::from_toml("[ranking]\nrole_token_boost = -0.1\n").unwrap_err();
    assert!(err.to_string().contains("role_token_boost"));
}

#[test]
fn config_rejects_cap_below_step() {
    let toml = "[ranking]\ndensity_step = 0.2\ndensity_cap = 0.1\n";
    assert!(RegwiseConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_soft_bonus_above_match_boost() {
    let toml = "[ranking]\nsoft_framework_bonus = 0.3\n";
    assert!(RegwiseConfig::from_toml(toml).is_err());
}

#[test]
fn config_rejects_unknown_provider() {
    let err = RegwiseConfig::from_toml("[embedding]\nprovider = \"onnx\"\n").unwrap_err();
    assert!(err.to_string().contains("onnx"));
}

#[test]
fn config_rejects_malformed_toml() {
    assert!(RegwiseConfig::from_toml("[retrieval\nmax_context = ").is_err());
}

#[test]
fn config_roundtrips_through_toml() {
    let config = RegwiseConfig::default();
    let serialized = toml::to_string(&config).unwrap();
    let parsed = RegwiseConfig::from_toml(&serialized).unwrap();
    assert_eq!(parsed.ranking.near_tie_epsilon, config.ranking.near_tie_epsilon);
    assert_eq!(parsed.ingest.embedded_file, config.ingest.embedded_file);
}

#[test]
fn config_loads_from_file_and_reports_missing_path() {
    let path = std::env::temp_dir().join(format!("regwise-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[ranking]\nnear_tie_epsilon = 0.05\n").unwrap();
    let config = RegwiseConfig::from_file(&path).unwrap();
    assert_eq!(config.ranking.near_tie_epsilon, 0.05);
    std::fs::remove_file(&path).unwrap();

    let err = RegwiseConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
