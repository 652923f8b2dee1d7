use crate::models::{UsageStats, ValueContext, ValueEstimate};

/// Turns a chunk's usage statistics into an estimated value and an
/// exploration bound. Implementations must be pure: identical inputs give
/// bit-identical outputs.
pub trait IValueEstimator: Send + Sync {
    fn estimate(&self, stats: &UsageStats, ctx: &ValueContext) -> ValueEstimate;
}
