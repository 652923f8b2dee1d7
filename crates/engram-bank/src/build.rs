//! Load-time construction of a participant's bank.

use engram_chunking::{Chunker, EventStreamIndex};
use engram_core::config::BankConfig;
use engram_core::errors::EngramResult;
use tracing::info;

use crate::store::MemoryStore;

/// Chunk the whole stream and insert every chunk in order, evicting as the
/// store fills.
pub fn build(
    participant_events: &EventStreamIndex,
    chunk_size: usize,
    capacity: usize,
) -> EngramResult<MemoryStore> {
    build_with_config(
        participant_events,
        BankConfig::with_sizes(chunk_size, capacity),
    )
}

pub fn build_with_config(
    participant_events: &EventStreamIndex,
    config: BankConfig,
) -> EngramResult<MemoryStore> {
    let chunker = Chunker::new(config.chunk_size)?;
    let mut store = MemoryStore::with_config(participant_events.participant(), config)?;

    let chunks = chunker.chunk(participant_events);
    let produced = chunks.len();
    let mut evicted = 0usize;
    for chunk in chunks {
        if store.insert(chunk)?.is_some() {
            evicted += 1;
        }
    }

    info!(
        participant = participant_events.participant(),
        events = participant_events.len(),
        chunks = produced,
        kept = store.len(),
        evicted,
        "built memory bank"
    );
    Ok(store)
}
