//! Informational diversity of a chunk within the store.

use engram_core::models::Signature;

/// `1 / (1 + overlapping)`: a chunk sharing no feature with any other
/// stored chunk earns the full bonus.
pub fn rarity_bonus(overlapping_chunks: usize) -> f64 {
    1.0 / (1.0 + overlapping_chunks as f64)
}

/// For each signature, how many of the others share at least one feature with it.
pub fn overlap_counts(signatures: &[&Signature]) -> Vec<usize> {
    let mut counts = vec![0usize; signatures.len()];
    for i in 0..signatures.len() {
        for j in (i + 1)..signatures.len() {
            if signatures[i].shares_feature_with(signatures[j]) {
                counts[i] += 1;
                counts[j] += 1;
            }
        }
    }
    counts
}
