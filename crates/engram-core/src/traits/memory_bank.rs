//! IMemoryBank: The surface the surrounding driver talks to.

use crate::errors::EngramResult;
use crate::models::{
    ChunkId, ChunkStatistics, ChunkSummary, EventWindow, FeedbackOutcome, QuerySignature,
    UsageStats,
};

/// Per-participant long-term memory.
///
/// Implemented by the plain store (single owner) and by the lock-guarded
/// shared handle.
pub trait IMemoryBank {
    /// Top-`k` chunks for the query. Updates access statistics of the
    /// returned chunks.
    fn retrieve(&mut self, query: &QuerySignature, k: usize) -> EngramResult<Vec<ChunkSummary>>;

    /// Report whether an offered chunk was actually used.
    fn record_feedback(&mut self, id: &ChunkId, was_useful: bool) -> EngramResult<FeedbackOutcome>;

    /// Turn a short-term window into a long-term chunk. Returns its identity.
    fn promote(&mut self, stm_window: EventWindow<'_>, confidence: f64) -> EngramResult<ChunkId>;

    /// Read-only statistics snapshot.
    fn all_chunks(&self) -> EngramResult<Vec<ChunkStatistics>>;

    /// Live usage counters of one chunk; `None` once it has been evicted.
    fn usage(&self, id: &ChunkId) -> EngramResult<Option<UsageStats>>;
}
