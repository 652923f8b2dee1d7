//! Fixed-size, non-overlapping chunking.

use engram_core::errors::{EngramError, EngramResult};
use engram_core::models::{Chunk, ChunkId, EventWindow, Provenance};
use tracing::debug;

use crate::index::EventStreamIndex;
use crate::signature::extract_signature;

/// Splits an event stream into chunks of `chunk_size` events. The trailing
/// partial chunk is kept as-is.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
}

impl Chunker {
    pub fn new(chunk_size: usize) -> EngramResult<Self> {
        if chunk_size == 0 {
            return Err(EngramError::invalid("chunk_size", "must be > 0"));
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk the whole index. Ordinals start at 0.
    pub fn chunk(&self, index: &EventStreamIndex) -> Vec<Chunk> {
        let chunks = self.chunk_from(index.participant(), index.all(), 0);
        debug!(
            participant = index.participant(),
            events = index.len(),
            chunks = chunks.len(),
            "chunked event stream"
        );
        chunks
    }

    /// Chunk `window`, numbering chunks from `first_ordinal`.
    pub fn chunk_from(
        &self,
        participant: &str,
        window: EventWindow<'_>,
        first_ordinal: usize,
    ) -> Vec<Chunk> {
        window
            .events
            .chunks(self.chunk_size)
            .enumerate()
            .filter_map(|(i, events)| {
                let sub = EventWindow::new(window.first_event + i * self.chunk_size, events);
                chunk_window(ChunkId::indexed(participant, first_ordinal + i), sub)
            })
            .collect()
    }
}

/// Summarize one window into a chunk. `None` for an empty window.
///
/// The chunk's creation time is its first event's timestamp; promotion
/// overrides it.
pub fn chunk_window(id: ChunkId, window: EventWindow<'_>) -> Option<Chunk> {
    let (start_time, end_time) = window.time_range()?;
    let last_event = window.last_event()?;
    Some(Chunk {
        id,
        provenance: Provenance {
            first_event: window.first_event,
            last_event,
            start_time,
            end_time,
        },
        signature: extract_signature(window.events),
        creation_time: start_time,
    })
}
