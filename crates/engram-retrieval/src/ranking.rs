//! Blended ranking: similarity scaled by the exploration bonus.

use std::cmp::Ordering;

use engram_core::models::{ChunkId, Signature, TimestampMs, ValueEstimate};

/// A stored chunk as the ranker sees it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub id: &'a ChunkId,
    pub signature: &'a Signature,
    pub estimate: ValueEstimate,
    pub last_access_time: Option<TimestampMs>,
    pub end_time: TimestampMs,
}

/// A candidate that made the cut.
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub candidate: Candidate<'a>,
    pub similarity: f64,
    pub score: f64,
}

/// `similarity * (1 + confidence_bound)`.
pub fn blended_score(similarity: f64, confidence_bound: f64) -> f64 {
    similarity * (1.0 + confidence_bound)
}

/// Best first: higher score, then higher estimated value, then more recent
/// access, then smaller identity.
pub fn compare(a: &RankedCandidate<'_>, b: &RankedCandidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| {
            b.candidate
                .estimate
                .estimated_value
                .total_cmp(&a.candidate.estimate.estimated_value)
        })
        .then_with(|| b.candidate.last_access_time.cmp(&a.candidate.last_access_time))
        .then_with(|| a.candidate.id.cmp(b.candidate.id))
}

/// Sort best-first and keep at most `k`.
pub fn top_k(mut ranked: Vec<RankedCandidate<'_>>, k: usize) -> Vec<RankedCandidate<'_>> {
    ranked.sort_by(compare);
    ranked.truncate(k);
    ranked
}
