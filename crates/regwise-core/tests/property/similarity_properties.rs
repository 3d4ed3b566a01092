use proptest::prelude::*;
use regwise_core::cosine_similarity;

fn arb_vector(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, len)
}

proptest! {
    #[test]
    fn cosine_is_bounded(a in arb_vector(16), b in arb_vector(16)) {
        let s = cosine_similarity(&a, &b);
        prop_assert!(s.is_finite());
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&s));
    }

    #[test]
    fn cosine_is_symmetric(a in arb_vector(8), b in arb_vector(8)) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_always_scores_zero(a in arb_vector(12)) {
        prop_assert_eq!(cosine_similarity(&a, &[0.0; 12]), 0.0);
    }

    #[test]
    fn cosine_ignores_positive_scaling(a in arb_vector(8), b in arb_vector(8), k in 0.1f32..50.0) {
        let scaled: Vec<f32> = a.iter().map(|x| x * k).collect();
        let s1 = cosine_similarity(&a, &b);
        let s2 = cosine_similarity(&scaled, &b);
        prop_assert!((s1 - s2).abs() < 1e-4);
    }
}
