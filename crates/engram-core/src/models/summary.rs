//! Retrieval results handed to the downstream reasoning step.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ChunkId, Provenance, Signature, TimestampMs};

/// What a retrieval returns per chunk: enough to cite the chunk in a prompt,
/// never the raw events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSummary {
    pub id: ChunkId,
    pub start_time: TimestampMs,
    pub end_time: TimestampMs,
    pub first_event: usize,
    pub last_event: usize,
    pub signature: Signature,
    pub estimated_value: f64,
    /// Similarity to the query that produced this summary.
    pub similarity: f64,
}

impl ChunkSummary {
    pub fn provenance(&self) -> Provenance {
        Provenance {
            first_event: self.first_event,
            last_event: self.last_event,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

impl fmt::Display for ChunkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[chunk {}] t={}->{} idx={}->{} value={:.3}",
            self.id,
            self.start_time,
            self.end_time,
            self.first_event,
            self.last_event,
            self.estimated_value
        )?;
        writeln!(f, "- top_pages: {:?}", self.signature.pages)?;
        writeln!(f, "- top_widgets: {:?}", self.signature.widgets)?;
        write!(f, "- top_ops: {:?}", self.signature.operations)
    }
}
