//! ParticipantBanks: One bank per participant, created on first use.

use dashmap::DashMap;
use engram_chunking::EventStreamIndex;
use engram_core::config::BankConfig;
use engram_core::errors::EngramResult;
use tracing::info;

use crate::build::build_with_config;
use crate::shared::SharedMemoryStore;
use crate::store::MemoryStore;

/// Concurrent registry of per-participant banks sharing one configuration.
#[derive(Debug, Default)]
pub struct ParticipantBanks {
    config: BankConfig,
    banks: DashMap<String, SharedMemoryStore>,
}

impl ParticipantBanks {
    pub fn new(config: BankConfig) -> EngramResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            banks: DashMap::new(),
        })
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// The participant's bank, creating an empty one if absent.
    pub fn get_or_create(&self, participant: &str) -> EngramResult<SharedMemoryStore> {
        if let Some(bank) = self.banks.get(participant) {
            return Ok(bank.clone());
        }
        let store = MemoryStore::with_config(participant, self.config.clone())?;
        let bank = self
            .banks
            .entry(participant.to_string())
            .or_insert_with(|| SharedMemoryStore::new(store))
            .clone();
        Ok(bank)
    }

    /// Build a bank from the participant's full stream, replacing any
    /// existing one.
    pub fn load(&self, index: &EventStreamIndex) -> EngramResult<SharedMemoryStore> {
        let store = build_with_config(index, self.config.clone())?;
        let bank = SharedMemoryStore::new(store);
        let replaced = self
            .banks
            .insert(index.participant().to_string(), bank.clone())
            .is_some();
        info!(participant = index.participant(), replaced, "loaded participant bank");
        Ok(bank)
    }

    pub fn get(&self, participant: &str) -> Option<SharedMemoryStore> {
        self.banks.get(participant).map(|b| b.clone())
    }

    pub fn remove(&self, participant: &str) -> Option<SharedMemoryStore> {
        self.banks.remove(participant).map(|(_, bank)| bank)
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }

    /// Registered participants, sorted.
    pub fn participants(&self) -> Vec<String> {
        let mut names: Vec<String> = self.banks.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
