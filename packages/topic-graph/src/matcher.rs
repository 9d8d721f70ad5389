//! Similarity matching over embedding pools.
//!
//! Pure computation: no store or provider access. The builder scopes the
//! pool (by user, node type and optionally parent) before calling in.

use crate::types::node::Node;

/// Best pool entry for a candidate, with its cosine similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarMatch<'a, T> {
    pub item: &'a T,
    pub score: f32,
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths, empty input or a zero-norm vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Find the pool entry most similar to `candidate`.
///
/// Returns `None` for an empty pool without computing anything, and `None`
/// when the best score is below `threshold`. Ties resolve to the first
/// maximum in pool order. Entries scoring NaN or infinity are ignored.
pub fn find_similar<'a, T, I>(
    candidate: &[f32],
    pool: I,
    threshold: f32,
) -> Option<SimilarMatch<'a, T>>
where
    T: 'a,
    I: IntoIterator<Item = (&'a T, &'a [f32])>,
{
    let mut pool = pool.into_iter().peekable();
    pool.peek()?;

    let mut best: Option<SimilarMatch<'a, T>> = None;
    for (item, embedding) in pool {
        let score = cosine_similarity(candidate, embedding);
        if !score.is_finite() {
            continue;
        }
        if best.as_ref().map_or(true, |current| score > current.score) {
            best = Some(SimilarMatch { item, score });
        }
    }

    best.filter(|m| m.score >= threshold)
}

/// `find_similar` over nodes, using each node's stored embedding.
pub fn find_similar_node<'a>(
    candidate: &[f32],
    nodes: &'a [Node],
    threshold: f32,
) -> Option<SimilarMatch<'a, Node>> {
    find_similar(
        candidate,
        nodes.iter().map(|n| (n, n.embedding.as_slice())),
        threshold,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool<'a>(entries: &'a [(&'a str, Vec<f32>)]) -> Vec<(&'a &'a str, &'a [f32])> {
        entries.iter().map(|(n, e)| (n, e.as_slice())).collect()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 1e-6);
        assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_empty_pool_returns_none() {
        let empty: Vec<(&&str, &[f32])> = Vec::new();
        assert!(find_similar(&[1.0, 0.0], empty, -1.0).is_none());
    }

    #[test]
    fn test_returns_argmax_above_threshold() {
        let entries = [
            ("far", vec![0.0, 1.0]),
            ("near", vec![0.9, 0.1]),
            ("middle", vec![0.5, 0.5]),
        ];
        let found = find_similar(&[1.0, 0.0], pool(&entries), 0.5).unwrap();
        assert_eq!(*found.item, "near");
        assert!(found.score > 0.9);
    }

    #[test]
    fn test_best_below_threshold_returns_none() {
        let entries = [("far", vec![0.0, 1.0]), ("middle", vec![0.5, 0.5])];
        assert!(find_similar(&[1.0, 0.0], pool(&entries), 0.8).is_none());
    }

    #[test]
    fn test_score_equal_to_threshold_matches() {
        let entries = [("same", vec![2.0, 0.0])];
        let found = find_similar(&[1.0, 0.0], pool(&entries), 1.0);
        assert!(found.is_some());
    }

    #[test]
    fn test_ties_resolve_to_first_in_pool_order() {
        let entries = [
            ("first", vec![1.0, 0.0]),
            ("second", vec![1.0, 0.0]),
            ("third", vec![3.0, 0.0]),
        ];
        let found = find_similar(&[1.0, 0.0], pool(&entries), 0.5).unwrap();
        assert_eq!(*found.item, "first");
    }

    #[test]
    fn test_non_finite_scores_do_not_hide_later_match() {
        let entries = [
            ("broken", vec![f32::NAN, 0.0]),
            ("overflow", vec![f32::INFINITY, 0.0]),
            ("near", vec![0.9, 0.1]),
        ];
        let found = find_similar(&[1.0, 0.0], pool(&entries), 0.5).unwrap();
        assert_eq!(*found.item, "near");

        let entries = [("broken", vec![f32::NAN, 0.0])];
        assert!(find_similar(&[1.0, 0.0], pool(&entries), -1.0).is_none());
    }
}
