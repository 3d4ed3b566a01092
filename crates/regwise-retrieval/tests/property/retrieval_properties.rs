use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use regwise_core::config::{RankingConfig, RetrievalConfig};
use regwise_core::models::{ChunkMetadata, ChunkType, KnowledgeChunk, RankedChunk};
use regwise_core::traits::{IChunkStore, IEmbeddingProvider};
use regwise_embeddings::RegulatoryLexicon;
use regwise_retrieval::ranking::FrameworkMatch;
use regwise_retrieval::{RankingContext, RankingPipeline, SeedBank, SimilaritySearch};
use regwise_store::ChunkStore;

const FRAMEWORKS: [Option<&str>; 5] = [
    Some("nis2-2023"),
    Some("dora-2024"),
    Some("owasp-top10-2021"),
    Some("gdpr-2018"),
    None,
];

const PHRASES: [&str; 8] = [
    "encryption keys and TLS",
    "incident notification to the CSIRT",
    "access control and least privilege",
    "vulnerability disclosure and patching",
    "third-party provider exit strategy",
    "developer secure coding practices",
    "product manager acceptance criteria",
    "board reporting of cyber risk",
];

fn arb_chunk(id: usize) -> impl Strategy<Value = KnowledgeChunk> {
    (0..FRAMEWORKS.len(), prop::collection::vec(0..PHRASES.len(), 1..4)).prop_map(move |(fw, words)| {
        let text = words.iter().map(|w| PHRASES[*w]).collect::<Vec<_>>().join(". ");
        KnowledgeChunk::new(
            format!("chunk-{id}"),
            text,
            ChunkType::Guidance,
            ChunkMetadata {
                framework: FRAMEWORKS[fw].map(str::to_string),
                ..Default::default()
            },
        )
    })
}

fn arb_candidates() -> impl Strategy<Value = Vec<RankedChunk>> {
    prop::collection::vec((0usize..12, 0.0f64..1.0), 0..30).prop_flat_map(|picks| {
        let strategies: Vec<_> = picks
            .into_iter()
            .map(|(id, sim)| arb_chunk(id).prop_map(move |c| RankedChunk::new(Arc::new(c), sim)))
            .collect();
        strategies
    })
}

fn arb_frameworks() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![Just("nis2"), Just("DORA"), Just("hipaa"), Just("OWASP")], 0..3)
        .prop_map(|v| v.into_iter().map(str::to_string).collect())
}

fn pipeline() -> RankingPipeline {
    RankingPipeline::new(&RankingConfig::default(), &RetrievalConfig::default())
}

proptest! {
    #[test]
    fn context_and_citations_stay_within_caps(
        candidates in arb_candidates(),
        query in prop::sample::select(PHRASES.to_vec()),
        frameworks in arb_frameworks(),
    ) {
        let seeds = SeedBank::empty();
        let ctx = RankingContext::new(query, Some("developer"), &frameworks, &seeds);
        let ranking = pipeline().rank(candidates, &ctx);

        prop_assert!(ranking.context.len() <= 5);
        prop_assert!(ranking.citations.len() <= 3);
        let distinct: HashSet<_> = ranking.citations.iter().collect();
        prop_assert_eq!(distinct.len(), ranking.citations.len());
        let ids: HashSet<_> = ranking.context.iter().map(|c| c.chunk.id.as_str()).collect();
        prop_assert_eq!(ids.len(), ranking.context.len());
        for citation in &ranking.citations {
            prop_assert!(ranking.context.iter().any(|c| c.chunk.metadata.framework.as_ref() == Some(citation)));
        }
    }

    #[test]
    fn ranking_is_deterministic(
        candidates in arb_candidates(),
        query in prop::sample::select(PHRASES.to_vec()),
        frameworks in arb_frameworks(),
    ) {
        let seeds = SeedBank::empty();
        let ctx = RankingContext::new(query, None, &frameworks, &seeds);
        let first = pipeline().rank(candidates.clone(), &ctx);
        let second = pipeline().rank(candidates, &ctx);
        let ids = |r: &regwise_retrieval::Ranking| r.context.iter().map(|c| c.chunk.id.clone()).collect::<Vec<_>>();
        prop_assert_eq!(ids(&first), ids(&second));
        prop_assert_eq!(first.citations, second.citations);
    }

    #[test]
    fn hard_match_excludes_other_frameworks(
        candidates in arb_candidates(),
        frameworks in arb_frameworks(),
    ) {
        let seeds = SeedBank::empty();
        let ctx = RankingContext::new("incident notification", None, &frameworks, &seeds);
        let ranking = pipeline().rank(candidates, &ctx);
        if ranking.hard_filtered {
            for c in &ranking.context {
                prop_assert_eq!(c.framework_match, FrameworkMatch::Hard);
            }
        }
    }

    #[test]
    fn higher_threshold_returns_a_subset(
        chunks in (1usize..15).prop_flat_map(|n| (0..n).map(arb_chunk).collect::<Vec<_>>()),
        query in prop::sample::select(PHRASES.to_vec()),
        low in 0.0f64..0.5,
        bump in 0.0f64..0.5,
    ) {
        let embedder = RegulatoryLexicon::new(64);
        let store = ChunkStore::new();
        for chunk in chunks {
            let vector = embedder.embed(&chunk.text).unwrap();
            let _ = store.insert(chunk.with_embedding(vector));
        }
        let search = SimilaritySearch::new(&store, &embedder);
        let loose = search.search(query, low).unwrap();
        let strict = search.search(query, low + bump).unwrap();

        let loose_ids: HashSet<_> = loose.iter().map(|r| r.id().to_string()).collect();
        prop_assert!(strict.len() <= loose.len());
        for hit in &strict {
            prop_assert!(loose_ids.contains(hit.id()));
            prop_assert!(hit.similarity >= low + bump);
        }
        for pair in loose.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
        prop_assert!(loose.len() <= store.snapshot().unwrap().len());
    }
}
