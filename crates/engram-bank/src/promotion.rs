//! STM → LTM promotion: the caller-side policy and the timestamp rule.

use engram_core::config::BankConfig;
use engram_core::models::TimestampMs;

/// Decides *when* to promote. The store only knows *how*.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromotionPolicy {
    threshold: f64,
}

impl PromotionPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &BankConfig) -> Self {
        Self::new(config.promotion_confidence_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Strictly above the threshold.
    pub fn should_promote(&self, confidence: f64) -> bool {
        confidence > self.threshold
    }
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self::from_config(&BankConfig::default())
    }
}

/// Creation timestamp of a promoted chunk: no earlier than the store clock
/// or the window's end, and strictly after the previous promotion so
/// promoted identities never repeat within a store's lifetime.
pub fn promotion_time(
    clock: TimestampMs,
    window_end: TimestampMs,
    last_promotion: Option<TimestampMs>,
) -> TimestampMs {
    let base = clock.max(window_end);
    match last_promotion {
        Some(last) if last >= base => last.saturating_add(1),
        _ => base,
    }
}
