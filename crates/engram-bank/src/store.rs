//! MemoryStore: One participant's capacity-bounded long-term memory.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use engram_chunking::chunk_window;
use engram_core::config::BankConfig;
use engram_core::errors::{EngramError, EngramResult};
use engram_core::models::{
    BankStatistics, Chunk, ChunkId, ChunkStatistics, ChunkSummary, EventWindow, FeedbackOutcome,
    QuerySignature, Signature, TimestampMs, UsageStats, ValueContext, ValueEstimate,
};
use engram_core::traits::{IMemoryBank, IValueEstimator};
use engram_retrieval::{Candidate, Retriever};
use engram_valuation::factors::rarity::overlap_counts;
use engram_valuation::ValueEngine;
use tracing::{debug, info};

use crate::eviction::{select_victim, EvictionCandidate};
use crate::promotion::promotion_time;

/// Number of chunks listed in [`BankStatistics::top_valuable`].
const TOP_VALUABLE: usize = 5;

struct StoredChunk {
    chunk: Chunk,
    stats: UsageStats,
    /// Derived from `stats` and the store state; refreshed after every mutation.
    estimate: ValueEstimate,
    rewards: VecDeque<f64>,
}

impl StoredChunk {
    fn statistics(&self) -> ChunkStatistics {
        let p = &self.chunk.provenance;
        ChunkStatistics {
            id: self.chunk.id.clone(),
            start_time: p.start_time,
            end_time: p.end_time,
            access_count: self.stats.access_count,
            useful_count: self.stats.useful_count,
            estimated_value: self.estimate.estimated_value,
            confidence_bound: self.estimate.confidence_bound,
            creation_time: self.stats.creation_time,
            last_access_time: self.stats.last_access_time,
            recent_rewards: self.rewards.iter().copied().collect(),
        }
    }

    fn summary(&self, similarity: f64) -> ChunkSummary {
        let p = &self.chunk.provenance;
        ChunkSummary {
            id: self.chunk.id.clone(),
            start_time: p.start_time,
            end_time: p.end_time,
            first_event: p.first_event,
            last_event: p.last_event,
            signature: self.chunk.signature.clone(),
            estimated_value: self.estimate.estimated_value,
            similarity,
        }
    }
}

/// Adaptive long-term memory of a single participant.
///
/// Chunks are keyed by identity in a sorted map so every scan, and therefore
/// every tie-break, is deterministic.
pub struct MemoryStore {
    participant: String,
    config: BankConfig,
    estimator: Arc<dyn IValueEstimator>,
    retriever: Retriever,
    entries: BTreeMap<ChunkId, StoredChunk>,
    /// Largest timestamp observed through insertions and queries.
    clock: TimestampMs,
    /// Lifetime access total. Evictions never decrement it.
    total_accesses: u64,
    last_promotion: Option<TimestampMs>,
}

impl MemoryStore {
    /// Empty store with default tuning and the given capacity.
    pub fn new(participant: impl Into<String>, capacity: usize) -> EngramResult<Self> {
        let config = BankConfig {
            capacity,
            ..BankConfig::default()
        };
        Self::with_config(participant, config)
    }

    pub fn with_config(participant: impl Into<String>, config: BankConfig) -> EngramResult<Self> {
        let engine = ValueEngine::from_config(&config);
        Self::with_estimator(participant, config, Arc::new(engine))
    }

    /// Store using a caller-supplied value estimator.
    pub fn with_estimator(
        participant: impl Into<String>,
        config: BankConfig,
        estimator: Arc<dyn IValueEstimator>,
    ) -> EngramResult<Self> {
        config.validate()?;
        Ok(Self {
            participant: participant.into(),
            retriever: Retriever::from_config(&config),
            config,
            estimator,
            entries: BTreeMap::new(),
            clock: 0,
            total_accesses: 0,
            last_promotion: None,
        })
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &ChunkId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn clock(&self) -> TimestampMs {
        self.clock
    }

    pub fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    pub fn chunk(&self, id: &ChunkId) -> Option<&Chunk> {
        self.entries.get(id).map(|e| &e.chunk)
    }

    pub fn usage(&self, id: &ChunkId) -> Option<UsageStats> {
        self.entries.get(id).map(|e| e.stats)
    }

    pub fn statistics_for(&self, id: &ChunkId) -> Option<ChunkStatistics> {
        self.entries.get(id).map(StoredChunk::statistics)
    }

    /// Add a chunk with zeroed usage. If the store then exceeds capacity,
    /// the lowest-valued chunk (possibly the new one) is evicted and its
    /// identity returned.
    pub fn insert(&mut self, chunk: Chunk) -> EngramResult<Option<ChunkId>> {
        if self.entries.contains_key(&chunk.id) {
            return Err(EngramError::DuplicateChunk {
                id: chunk.id.to_string(),
            });
        }
        self.clock = self.clock.max(chunk.creation_time);
        let stats = UsageStats::new(chunk.creation_time);
        let estimate = self.estimator.estimate(
            &stats,
            &ValueContext {
                now: self.clock,
                total_store_accesses: self.total_accesses,
                overlapping_chunks: 0,
            },
        );
        self.entries.insert(
            chunk.id.clone(),
            StoredChunk {
                chunk,
                stats,
                estimate,
                rewards: VecDeque::new(),
            },
        );
        self.refresh();

        if self.entries.len() <= self.config.capacity {
            return Ok(None);
        }
        let victim = select_victim(self.entries.iter().map(|(id, e)| EvictionCandidate {
            id,
            estimated_value: e.estimate.estimated_value,
            creation_time: e.stats.creation_time,
        }))
        .cloned();
        if let Some(id) = &victim {
            if let Some(evicted) = self.entries.remove(id) {
                debug!(
                    participant = %self.participant,
                    chunk = %id,
                    value = evicted.estimate.estimated_value,
                    accesses = evicted.stats.access_count,
                    "evicted chunk"
                );
            }
            self.refresh();
        }
        Ok(victim)
    }

    /// Rank stored chunks against `query` and return at most `k` summaries.
    ///
    /// Every returned chunk is counted as accessed at the query time, and the
    /// lifetime access total grows by the number returned.
    pub fn retrieve(&mut self, query: &QuerySignature, k: usize) -> Vec<ChunkSummary> {
        self.clock = self.clock.max(query.at);
        if self.entries.is_empty() || k == 0 {
            return Vec::new();
        }
        self.refresh();

        let selected: Vec<(ChunkId, f64)> = {
            let candidates = self
                .entries
                .iter()
                .map(|(id, e)| Candidate {
                    id,
                    signature: &e.chunk.signature,
                    estimate: e.estimate,
                    last_access_time: e.stats.last_access_time,
                    end_time: e.chunk.provenance.end_time,
                })
                .collect();
            self.retriever
                .rank(candidates, query, k)
                .into_iter()
                .map(|r| (r.candidate.id.clone(), r.similarity))
                .collect()
        };

        for (id, _) in &selected {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.stats.access_count += 1;
                entry.stats.last_access_time = Some(query.at);
                self.total_accesses += 1;
            }
        }
        self.refresh();

        debug!(
            participant = %self.participant,
            returned = selected.len(),
            total_accesses = self.total_accesses,
            "retrieved chunks"
        );
        selected
            .iter()
            .filter_map(|(id, sim)| self.entries.get(id).map(|e| e.summary(*sim)))
            .collect()
    }

    /// Report whether an offered chunk was used. Feedback on a chunk that has
    /// since been evicted is a no-op.
    ///
    /// The store does not track which chunks were offered; keeping
    /// `useful_count <= access_count` is the caller's job (see
    /// [`FeedbackSink`](crate::FeedbackSink)).
    pub fn record_feedback(&mut self, id: &ChunkId, was_useful: bool) -> FeedbackOutcome {
        let history_len = self.config.reward_history_len;
        let Some(entry) = self.entries.get_mut(id) else {
            debug!(participant = %self.participant, chunk = %id, "feedback for evicted chunk");
            return FeedbackOutcome::StaleChunk;
        };
        if history_len > 0 {
            if entry.rewards.len() == history_len {
                entry.rewards.pop_front();
            }
            entry.rewards.push_back(if was_useful { 1.0 } else { 0.0 });
        }
        if !was_useful {
            return FeedbackOutcome::Acknowledged;
        }
        entry.stats.useful_count += 1;
        self.refresh();
        FeedbackOutcome::Credited
    }

    /// Summarize a short-term window into a new long-term chunk.
    ///
    /// The new chunk starts with zeroed usage and may be evicted at once if
    /// it is the lowest-valued chunk in a full store.
    pub fn promote(&mut self, window: EventWindow<'_>, confidence: f64) -> EngramResult<ChunkId> {
        let (_, window_end) = window.time_range().ok_or(EngramError::EmptyWindow)?;
        let created_at = promotion_time(self.clock, window_end, self.last_promotion);
        let id = ChunkId::promoted(self.participant.clone(), created_at);
        let mut chunk = chunk_window(id.clone(), window).ok_or(EngramError::EmptyWindow)?;
        chunk.creation_time = created_at;

        let evicted = self.insert(chunk)?;
        self.last_promotion = Some(created_at);
        info!(
            participant = %self.participant,
            chunk = %id,
            confidence,
            events = window.len(),
            evicted = ?evicted.as_ref().map(ToString::to_string),
            "promoted short-term window"
        );
        Ok(id)
    }

    /// Statistics for every stored chunk, ordered by identity.
    pub fn all_chunks(&self) -> Vec<ChunkStatistics> {
        self.entries.values().map(StoredChunk::statistics).collect()
    }

    /// Store-wide aggregates.
    pub fn statistics(&self) -> BankStatistics {
        if self.entries.is_empty() {
            return BankStatistics {
                total_accesses: self.total_accesses,
                ..BankStatistics::default()
            };
        }
        let n = self.entries.len() as f64;
        let (mut accesses, mut useful, mut value) = (0.0, 0.0, 0.0);
        for e in self.entries.values() {
            accesses += e.stats.access_count as f64;
            useful += e.stats.useful_count as f64;
            value += e.estimate.estimated_value;
        }

        let mut ranked: Vec<&StoredChunk> = self.entries.values().collect();
        ranked.sort_by(|a, b| {
            b.estimate
                .estimated_value
                .total_cmp(&a.estimate.estimated_value)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });

        BankStatistics {
            total_chunks: self.entries.len(),
            total_accesses: self.total_accesses,
            avg_access_count: accesses / n,
            avg_useful_count: useful / n,
            avg_estimated_value: value / n,
            top_valuable: ranked
                .into_iter()
                .take(TOP_VALUABLE)
                .map(|e| {
                    (
                        e.chunk.id.clone(),
                        e.estimate.estimated_value,
                        e.stats.useful_count,
                    )
                })
                .collect(),
        }
    }

    /// Recompute every cached estimate at the current clock.
    fn refresh(&mut self) {
        let overlaps = {
            let signatures: Vec<&Signature> =
                self.entries.values().map(|e| &e.chunk.signature).collect();
            overlap_counts(&signatures)
        };
        let (now, total) = (self.clock, self.total_accesses);
        for (entry, overlapping_chunks) in self.entries.values_mut().zip(overlaps) {
            entry.estimate = self.estimator.estimate(
                &entry.stats,
                &ValueContext {
                    now,
                    total_store_accesses: total,
                    overlapping_chunks,
                },
            );
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("participant", &self.participant)
            .field("len", &self.entries.len())
            .field("capacity", &self.config.capacity)
            .field("clock", &self.clock)
            .field("total_accesses", &self.total_accesses)
            .finish()
    }
}

impl IMemoryBank for MemoryStore {
    fn retrieve(&mut self, query: &QuerySignature, k: usize) -> EngramResult<Vec<ChunkSummary>> {
        Ok(MemoryStore::retrieve(self, query, k))
    }

    fn record_feedback(&mut self, id: &ChunkId, was_useful: bool) -> EngramResult<FeedbackOutcome> {
        Ok(MemoryStore::record_feedback(self, id, was_useful))
    }

    fn promote(&mut self, stm_window: EventWindow<'_>, confidence: f64) -> EngramResult<ChunkId> {
        MemoryStore::promote(self, stm_window, confidence)
    }

    fn all_chunks(&self) -> EngramResult<Vec<ChunkStatistics>> {
        Ok(MemoryStore::all_chunks(self))
    }

    fn usage(&self, id: &ChunkId) -> EngramResult<Option<UsageStats>> {
        Ok(MemoryStore::usage(self, id))
    }
}
