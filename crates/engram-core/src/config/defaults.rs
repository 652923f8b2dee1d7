//! Default values for every recognized option.

pub const CHUNK_SIZE: usize = 30;
pub const CAPACITY: usize = 50;
pub const TOP_K: usize = 5;
pub const EXPLORATION_FACTOR: f64 = 1.5;
/// Thirty seconds of interaction.
pub const DECAY_HALF_LIFE_MS: u64 = 30_000;
pub const PROMOTION_CONFIDENCE_THRESHOLD: f64 = 0.8;

pub const USAGE_WEIGHT: f64 = 0.5;
pub const RECENCY_WEIGHT: f64 = 0.3;
pub const RARITY_WEIGHT: f64 = 0.2;

/// Usage rate assumed for a chunk that was never retrieved.
pub const NEUTRAL_PRIOR: f64 = 0.5;
/// Recency never decays below this.
pub const RECENCY_FLOOR: f64 = 0.01;
/// Half-life stretch per useful confirmation.
pub const REINFORCEMENT_FACTOR: f64 = 0.3;

pub const FEEDBACK_SIMILARITY_THRESHOLD: f64 = 0.1;
pub const REWARD_HISTORY_LEN: usize = 5;
