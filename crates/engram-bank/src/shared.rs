//! SharedMemoryStore: A cloneable, lock-guarded handle to one store.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use engram_core::errors::{EngramError, EngramResult};
use engram_core::models::{
    BankStatistics, ChunkId, ChunkStatistics, ChunkSummary, EventWindow, FeedbackOutcome,
    QuerySignature, UsageStats,
};
use engram_core::traits::IMemoryBank;

use crate::store::MemoryStore;

/// Thread-safe handle. Retrieval mutates statistics, so it takes the write
/// lock; only snapshots read.
#[derive(Debug, Clone)]
pub struct SharedMemoryStore {
    inner: Arc<RwLock<MemoryStore>>,
}

impl SharedMemoryStore {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` with exclusive access, e.g. to advance a chunk cursor.
    pub fn with<R>(&self, f: impl FnOnce(&mut MemoryStore) -> R) -> EngramResult<R> {
        let mut store = self.write()?;
        Ok(f(&mut store))
    }

    pub fn len(&self) -> EngramResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> EngramResult<bool> {
        Ok(self.read()?.is_empty())
    }

    pub fn participant(&self) -> EngramResult<String> {
        Ok(self.read()?.participant().to_string())
    }

    pub fn statistics(&self) -> EngramResult<BankStatistics> {
        Ok(self.read()?.statistics())
    }

    fn read(&self) -> EngramResult<RwLockReadGuard<'_, MemoryStore>> {
        self.inner
            .read()
            .map_err(|e| EngramError::ConcurrencyError(e.to_string()))
    }

    fn write(&self) -> EngramResult<RwLockWriteGuard<'_, MemoryStore>> {
        self.inner
            .write()
            .map_err(|e| EngramError::ConcurrencyError(e.to_string()))
    }
}

impl IMemoryBank for SharedMemoryStore {
    fn retrieve(&mut self, query: &QuerySignature, k: usize) -> EngramResult<Vec<ChunkSummary>> {
        Ok(self.write()?.retrieve(query, k))
    }

    fn record_feedback(&mut self, id: &ChunkId, was_useful: bool) -> EngramResult<FeedbackOutcome> {
        Ok(self.write()?.record_feedback(id, was_useful))
    }

    fn promote(&mut self, stm_window: EventWindow<'_>, confidence: f64) -> EngramResult<ChunkId> {
        self.write()?.promote(stm_window, confidence)
    }

    fn all_chunks(&self) -> EngramResult<Vec<ChunkStatistics>> {
        Ok(self.read()?.all_chunks())
    }

    fn usage(&self, id: &ChunkId) -> EngramResult<Option<UsageStats>> {
        Ok(self.read()?.usage(id))
    }
}
