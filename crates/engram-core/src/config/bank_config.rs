//! Memory bank configuration.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{EngramError, EngramResult};

/// How query and chunk signatures are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMode {
    /// Jaccard over the combined, category-tagged feature set.
    #[default]
    Combined,
    /// 0.5 · J(widgets) + 0.3 · J(pages) + 0.2 · J(operations).
    CategoryWeighted,
}

/// Weights of the estimated-value terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueWeights {
    pub usage: f64,
    pub recency: f64,
    pub rarity: f64,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            usage: defaults::USAGE_WEIGHT,
            recency: defaults::RECENCY_WEIGHT,
            rarity: defaults::RARITY_WEIGHT,
        }
    }
}

/// Configuration for one participant's memory bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    // Chunking and capacity
    pub chunk_size: usize,
    pub capacity: usize,
    pub top_k: usize,

    // Valuation
    pub exploration_factor: f64,
    pub decay_half_life_ms: u64,
    pub weights: ValueWeights,
    pub neutral_prior: f64,
    pub recency_floor: f64,
    pub reinforcement_factor: f64,

    // Retrieval
    pub similarity_mode: SimilarityMode,
    /// Only consider chunks that ended within this many ms before the query.
    pub retrieval_window_ms: Option<u64>,

    // Feedback and promotion
    pub promotion_confidence_threshold: f64,
    pub feedback_similarity_threshold: f64,
    pub reward_history_len: usize,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            capacity: defaults::CAPACITY,
            top_k: defaults::TOP_K,
            exploration_factor: defaults::EXPLORATION_FACTOR,
            decay_half_life_ms: defaults::DECAY_HALF_LIFE_MS,
            weights: ValueWeights::default(),
            neutral_prior: defaults::NEUTRAL_PRIOR,
            recency_floor: defaults::RECENCY_FLOOR,
            reinforcement_factor: defaults::REINFORCEMENT_FACTOR,
            similarity_mode: SimilarityMode::default(),
            retrieval_window_ms: None,
            promotion_confidence_threshold: defaults::PROMOTION_CONFIDENCE_THRESHOLD,
            feedback_similarity_threshold: defaults::FEEDBACK_SIMILARITY_THRESHOLD,
            reward_history_len: defaults::REWARD_HISTORY_LEN,
        }
    }
}

impl BankConfig {
    /// Config with the given sizes and defaults for everything else.
    pub fn with_sizes(chunk_size: usize, capacity: usize) -> Self {
        Self {
            chunk_size,
            capacity,
            ..Self::default()
        }
    }

    /// Load config from a TOML string, falling back to defaults for missing
    /// fields, and validate it.
    pub fn from_toml(toml_str: &str) -> EngramResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the bank cannot operate with.
    pub fn validate(&self) -> EngramResult<()> {
        if self.chunk_size == 0 {
            return Err(EngramError::invalid("chunk_size", "must be > 0"));
        }
        if self.capacity == 0 {
            return Err(EngramError::invalid("capacity", "must be > 0"));
        }
        if !(self.exploration_factor.is_finite() && self.exploration_factor > 0.0) {
            return Err(EngramError::invalid("exploration_factor", "must be > 0"));
        }
        if self.decay_half_life_ms == 0 {
            return Err(EngramError::invalid("decay_half_life_ms", "must be > 0"));
        }
        let w = &self.weights;
        for (field, value) in [
            ("weights.usage", w.usage),
            ("weights.recency", w.recency),
            ("weights.rarity", w.rarity),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EngramError::invalid(field, "must be >= 0"));
            }
        }
        if w.usage + w.recency + w.rarity <= 0.0 {
            return Err(EngramError::invalid("weights", "must not all be zero"));
        }
        for (field, value) in [
            ("neutral_prior", self.neutral_prior),
            ("recency_floor", self.recency_floor),
            (
                "promotion_confidence_threshold",
                self.promotion_confidence_threshold,
            ),
            (
                "feedback_similarity_threshold",
                self.feedback_similarity_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngramError::invalid(field, "must be within 0..=1"));
            }
        }
        if !(self.reinforcement_factor.is_finite() && self.reinforcement_factor >= 0.0) {
            return Err(EngramError::invalid("reinforcement_factor", "must be >= 0"));
        }
        Ok(())
    }
}
