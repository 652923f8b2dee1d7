//! Valuation inputs and outputs.

use serde::{Deserialize, Serialize};

use super::TimestampMs;

/// Store-level facts a valuation depends on besides the chunk's own statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueContext {
    /// Valuation time (the store clock).
    pub now: TimestampMs,
    /// Lifetime retrieval count across the whole store.
    pub total_store_accesses: u64,
    /// Other stored chunks sharing at least one signature feature with this one.
    pub overlapping_chunks: usize,
}

/// Individual terms of an estimated value, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueComponents {
    pub usage_rate: f64,
    pub recency: f64,
    pub rarity: f64,
}

/// Derived value of a chunk. Reproducible from statistics and context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueEstimate {
    /// Proven value; the only quantity eviction looks at.
    pub estimated_value: f64,
    /// Exploration bonus; only retrieval ranking looks at it.
    pub confidence_bound: f64,
    pub components: ValueComponents,
}
