//! Signature similarity.

use std::collections::BTreeSet;

use engram_core::config::SimilarityMode;
use engram_core::models::{FeatureKind, QuerySignature, Signature};

/// |a ∩ b| / |a ∪ b|; 0 when both are empty.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Similarity of `signature` to the query, over the query's categories.
pub fn similarity(query: &QuerySignature, signature: &Signature, mode: SimilarityMode) -> f64 {
    let kinds = query.kinds();
    match mode {
        SimilarityMode::Combined => jaccard(
            &query.signature.features_in(kinds),
            &signature.features_in(kinds),
        ),
        SimilarityMode::CategoryWeighted => {
            let (mut weighted, mut total) = (0.0, 0.0);
            for &kind in kinds {
                let w = category_weight(kind);
                weighted += w * jaccard(
                    &query.signature.features_in(&[kind]),
                    &signature.features_in(&[kind]),
                );
                total += w;
            }
            if total > 0.0 {
                weighted / total
            } else {
                0.0
            }
        }
    }
}

/// Widgets are the most specific evidence of intent, operations the least.
fn category_weight(kind: FeatureKind) -> f64 {
    match kind {
        FeatureKind::Widget => 0.5,
        FeatureKind::Page => 0.3,
        FeatureKind::Operation => 0.2,
    }
}
