//! Victim selection under the capacity bound.

use engram_core::models::{ChunkId, TimestampMs};

/// What eviction looks at. Exploration bonus is deliberately absent.
#[derive(Debug, Clone, Copy)]
pub struct EvictionCandidate<'a> {
    pub id: &'a ChunkId,
    pub estimated_value: f64,
    pub creation_time: TimestampMs,
}

/// Lowest estimated value; ties go to the oldest creation time, then the
/// lexicographically smallest identity.
pub fn select_victim<'a>(
    candidates: impl IntoIterator<Item = EvictionCandidate<'a>>,
) -> Option<&'a ChunkId> {
    candidates
        .into_iter()
        .min_by(|a, b| {
            a.estimated_value
                .total_cmp(&b.estimated_value)
                .then(a.creation_time.cmp(&b.creation_time))
                .then_with(|| a.id.cmp(b.id))
        })
        .map(|c| c.id)
}
