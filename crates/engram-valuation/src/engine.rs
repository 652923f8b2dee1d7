//! ValueEngine: The default `IValueEstimator`.

use engram_core::config::{BankConfig, ValueWeights};
use engram_core::models::{UsageStats, ValueComponents, ValueContext, ValueEstimate};
use engram_core::traits::IValueEstimator;

use crate::factors::{exploration, rarity, recency, usage};

/// Weighted-sum value estimator with a UCB exploration bound.
#[derive(Debug, Clone)]
pub struct ValueEngine {
    weights: ValueWeights,
    neutral_prior: f64,
    half_life_ms: u64,
    recency_floor: f64,
    reinforcement_factor: f64,
    exploration_factor: f64,
}

impl ValueEngine {
    /// Engine with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&BankConfig::default())
    }

    pub fn from_config(config: &BankConfig) -> Self {
        Self {
            weights: config.weights,
            neutral_prior: config.neutral_prior,
            half_life_ms: config.decay_half_life_ms,
            recency_floor: config.recency_floor,
            reinforcement_factor: config.reinforcement_factor,
            exploration_factor: config.exploration_factor,
        }
    }

    /// The three value terms, before weighting.
    pub fn components(&self, stats: &UsageStats, ctx: &ValueContext) -> ValueComponents {
        let elapsed = ctx.now.saturating_sub(stats.last_touch());
        ValueComponents {
            usage_rate: usage::usage_rate(stats, self.neutral_prior),
            recency: recency::recency_decay(
                elapsed,
                self.half_life_ms,
                stats.useful_count,
                self.reinforcement_factor,
                self.recency_floor,
            ),
            rarity: rarity::rarity_bonus(ctx.overlapping_chunks),
        }
    }
}

impl Default for ValueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IValueEstimator for ValueEngine {
    fn estimate(&self, stats: &UsageStats, ctx: &ValueContext) -> ValueEstimate {
        let components = self.components(stats, ctx);
        let w = &self.weights;
        let estimated_value = w.usage * components.usage_rate
            + w.recency * components.recency
            + w.rarity * components.rarity;
        let confidence_bound = exploration::confidence_bound(
            self.exploration_factor,
            ctx.total_store_accesses,
            stats.access_count,
        );
        ValueEstimate {
            estimated_value,
            confidence_bound,
            components,
        }
    }
}
