//! Property tests for best-match search.

use proptest::prelude::*;
use topic_graph::{cosine_similarity, find_similar};

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, 4)
}

proptest! {
    #[test]
    fn test_returns_first_argmax_when_it_clears_threshold(
        candidate in vector(),
        pool in prop::collection::vec(vector(), 1..8),
        threshold in -1.0f32..1.0,
    ) {
        let labels: Vec<usize> = (0..pool.len()).collect();
        let found = find_similar(
            &candidate,
            labels.iter().zip(pool.iter()).map(|(label, v)| (label, v.as_slice())),
            threshold,
        );

        let mut best: Option<(usize, f32)> = None;
        for (i, v) in pool.iter().enumerate() {
            let score = cosine_similarity(&candidate, v);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        let expected = best.filter(|(_, s)| *s >= threshold);

        prop_assert_eq!(found.map(|m| (*m.item, m.score)), expected);
    }

    #[test]
    fn test_empty_pool_never_matches(candidate in vector(), threshold in -1.0f32..1.0) {
        let pool: Vec<(&usize, &[f32])> = Vec::new();
        prop_assert!(find_similar(&candidate, pool, threshold).is_none());
    }

    #[test]
    fn test_cosine_similarity_is_bounded_and_symmetric(a in vector(), b in vector()) {
        let ab = cosine_similarity(&a, &b);
        prop_assert!((-1.0001..=1.0001).contains(&ab));
        prop_assert!((ab - cosine_similarity(&b, &a)).abs() < 1e-6);
    }
}
