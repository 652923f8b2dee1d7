//! Reporting records. The bank never writes these anywhere itself.

use serde::{Deserialize, Serialize};

use super::{ChunkId, TimestampMs};

/// Per-chunk statistics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkStatistics {
    pub id: ChunkId,
    pub start_time: TimestampMs,
    pub end_time: TimestampMs,
    pub access_count: u64,
    pub useful_count: u64,
    pub estimated_value: f64,
    pub confidence_bound: f64,
    pub creation_time: TimestampMs,
    pub last_access_time: Option<TimestampMs>,
    /// Most recent feedback rewards, oldest first.
    pub recent_rewards: Vec<f64>,
}

/// Aggregate view of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankStatistics {
    pub total_chunks: usize,
    pub total_accesses: u64,
    pub avg_access_count: f64,
    pub avg_useful_count: f64,
    pub avg_estimated_value: f64,
    /// Up to five `(id, estimated_value, useful_count)` by descending value.
    pub top_valuable: Vec<(ChunkId, f64, u64)>,
}
