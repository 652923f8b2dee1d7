//! Incremental LTM growth as the anchor time moves forward.

use engram_chunking::{chunk_window, Chunker, EventStreamIndex};
use engram_core::errors::EngramResult;
use engram_core::models::{ChunkId, TimestampMs};
use tracing::debug;

use crate::store::MemoryStore;

/// Tracks how much of a participant's stream has been chunked into a store.
///
/// Each [`advance`](Self::advance) adds the complete chunks that lie entirely
/// before the anchor. While the store is still empty a trailing partial
/// chunk is taken too, so the first query has something to match against.
#[derive(Debug, Clone)]
pub struct ChunkCursor {
    chunker: Chunker,
    next_event: usize,
    next_ordinal: usize,
}

impl ChunkCursor {
    pub fn new(chunk_size: usize) -> EngramResult<Self> {
        Ok(Self {
            chunker: Chunker::new(chunk_size)?,
            next_event: 0,
            next_ordinal: 0,
        })
    }

    /// Position of the first event not yet chunked.
    pub fn next_event(&self) -> usize {
        self.next_event
    }

    /// Chunk events strictly earlier than `anchor_time` into `store`.
    /// Returns the identities inserted, in order.
    pub fn advance(
        &mut self,
        index: &EventStreamIndex,
        store: &mut MemoryStore,
        anchor_time: TimestampMs,
    ) -> EngramResult<Vec<ChunkId>> {
        let size = self.chunker.chunk_size();
        let available_end = index.before(anchor_time).len();
        let mut added = Vec::new();

        while self.next_event < available_end {
            let remaining = available_end - self.next_event;
            let take = if remaining >= size {
                size
            } else if store.is_empty() {
                remaining
            } else {
                break;
            };
            let window = index.slice(self.next_event, self.next_event + take);
            let id = ChunkId::indexed(index.participant(), self.next_ordinal);
            if let Some(chunk) = chunk_window(id.clone(), window) {
                store.insert(chunk)?;
                added.push(id);
            }
            self.next_event += take;
            self.next_ordinal += 1;
        }

        if !added.is_empty() {
            debug!(
                participant = index.participant(),
                anchor_time,
                added = added.len(),
                stored = store.len(),
                "advanced chunk cursor"
            );
        }
        Ok(added)
    }
}
