use std::collections::HashSet;

use proptest::prelude::*;
use regwise_core::models::{ChunkMetadata, ChunkType, KnowledgeChunk};
use regwise_core::traits::IChunkStore;
use regwise_store::ChunkStore;

#[derive(Debug, Clone)]
enum Op {
    Insert { id: u8, concepts: Vec<u8> },
    Retract { id: u8 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..12, prop::collection::vec(0u8..5, 0..4))
            .prop_map(|(id, concepts)| Op::Insert { id, concepts }),
        1 => (0u8..12).prop_map(|id| Op::Retract { id }),
    ]
}

fn chunk(id: u8, concepts: &[u8]) -> KnowledgeChunk {
    KnowledgeChunk::new(
        format!("chunk-{id}"),
        "text",
        ChunkType::Description,
        ChunkMetadata {
            concepts: concepts.iter().map(|c| format!("Concept {c}")).collect(),
            ..Default::default()
        },
    )
}

proptest! {
    #[test]
    fn indices_stay_consistent_under_any_op_sequence(ops in prop::collection::vec(arb_op(), 1..40)) {
        let store = ChunkStore::new();
        for op in &ops {
            match op {
                Op::Insert { id, concepts } => { let _ = store.insert(chunk(*id, concepts)); }
                Op::Retract { id } => { store.retract(&format!("chunk-{id}")).unwrap(); }
            }
            prop_assert!(store.verify_integrity().is_ok());
        }
        for concept in store.concepts().unwrap() {
            for c in store.by_concept(&concept).unwrap() {
                prop_assert!(c.metadata.concepts.contains(&concept));
            }
        }
    }

    #[test]
    fn ids_are_never_reused(ops in prop::collection::vec(arb_op(), 1..40)) {
        let store = ChunkStore::new();
        let mut seen: HashSet<u8> = HashSet::new();
        for op in &ops {
            if let Op::Insert { id, concepts } = op {
                let accepted = store.insert(chunk(*id, concepts)).is_ok();
                prop_assert_eq!(accepted, seen.insert(*id));
            } else if let Op::Retract { id } = op {
                store.retract(&format!("chunk-{id}")).unwrap();
            }
        }
    }

    #[test]
    fn confidence_outside_unit_interval_never_stored(confidence in -2.0f64..3.0) {
        let store = ChunkStore::new();
        let mut c = chunk(1, &[]);
        c.metadata.confidence = confidence;
        let accepted = store.insert(c).is_ok();
        prop_assert_eq!(accepted, (0.0..=1.0).contains(&confidence));
        prop_assert_eq!(store.len().unwrap(), usize::from(accepted));
    }

    #[test]
    fn snapshot_has_no_duplicate_ids(ids in prop::collection::vec(0u8..8, 0..30)) {
        let store = ChunkStore::new();
        let report = store.insert_batch(ids.iter().map(|i| chunk(*i, &[])).collect()).unwrap();
        let snapshot = store.snapshot().unwrap();
        let unique: HashSet<_> = snapshot.iter().map(|c| c.id.clone()).collect();
        prop_assert_eq!(unique.len(), snapshot.len());
        prop_assert_eq!(report.inserted + report.rejected.len(), ids.len());
    }
}
