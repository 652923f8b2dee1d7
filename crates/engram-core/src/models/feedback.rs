use serde::{Deserialize, Serialize};

/// What `record_feedback` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackOutcome {
    /// `useful_count` was incremented.
    Credited,
    /// The chunk exists but was reported as not useful; no counter moved.
    Acknowledged,
    /// The chunk is no longer stored (evicted since retrieval). Benign no-op.
    StaleChunk,
}
