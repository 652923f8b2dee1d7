use engram_core::models::UsageStats;

/// Fraction of retrievals that proved useful, or `prior` before the first one.
pub fn usage_rate(stats: &UsageStats, prior: f64) -> f64 {
    if stats.access_count == 0 {
        return prior;
    }
    (stats.useful_count as f64 / stats.access_count as f64).clamp(0.0, 1.0)
}
