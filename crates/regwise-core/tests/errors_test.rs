use regwise_core::errors::*;

#[test]
fn store_errors_convert_into_top_level() {
    let err: RegwiseError = StoreError::DuplicateChunkId {
        id: "owasp-a02-desc".to_string(),
    }
    .into();
    assert!(err.is_duplicate_id());
    assert!(err.to_string().contains("owasp-a02-desc"));
}

#[test]
fn invalid_confidence_names_value() {
    let err: RegwiseError = StoreError::InvalidConfidence {
        id: "x".to_string(),
        value: 1.5,
    }
    .into();
    assert!(!err.is_duplicate_id());
    assert!(err.to_string().contains("1.5"));
}

#[test]
fn malformed_record_reports_line() {
    let err: RegwiseError = IngestError::MalformedRecord {
        source_name: "regulatory_knowledge.embedded.jsonl".to_string(),
        line: 7,
        reason: "expected value".to_string(),
    }
    .into();
    let msg = err.to_string();
    assert!(msg.contains("line 7"));
    assert!(msg.contains("regulatory_knowledge.embedded.jsonl"));
}

#[test]
fn embedding_errors_convert() {
    let err: RegwiseError = EmbeddingError::DimensionMismatch {
        expected: 384,
        actual: 128,
    }
    .into();
    assert!(matches!(err, RegwiseError::EmbeddingError(_)));
}

#[test]
fn serde_errors_convert() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: RegwiseError = parse.into();
    assert!(matches!(err, RegwiseError::SerializationError(_)));
}
