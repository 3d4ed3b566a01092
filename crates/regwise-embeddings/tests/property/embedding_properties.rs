use proptest::prelude::*;
use regwise_core::traits::IEmbeddingProvider;
use regwise_embeddings::{RegulatoryLexicon, TfIdfFallback};

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

proptest! {
    #[test]
    fn lexicon_is_deterministic(text in "[a-zA-Z0-9 ,.:-]{0,200}") {
        let p = RegulatoryLexicon::new(384);
        prop_assert_eq!(p.embed(&text).unwrap(), p.embed(&text).unwrap());
    }

    #[test]
    fn lexicon_is_unit_or_zero(text in "[a-zA-Z ]{0,200}") {
        let v = RegulatoryLexicon::new(384).embed(&text).unwrap();
        let n = norm(&v);
        prop_assert!(n == 0.0 || (n - 1.0).abs() < 1e-4, "norm {}", n);
    }

    #[test]
    fn tfidf_is_unit_or_zero(text in "[a-zA-Z ]{0,200}") {
        let v = TfIdfFallback::new(256).embed(&text).unwrap();
        let n = norm(&v);
        prop_assert!(n == 0.0 || (n - 1.0).abs() < 1e-4, "norm {}", n);
    }

    #[test]
    fn dimensions_are_fixed(text in ".{0,100}", dims in 1usize..512) {
        prop_assert_eq!(RegulatoryLexicon::new(dims).embed(&text).unwrap().len(), dims);
        prop_assert_eq!(TfIdfFallback::new(dims).embed(&text).unwrap().len(), dims);
    }
}
