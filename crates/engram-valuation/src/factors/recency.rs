//! Exponential forgetting with a floor.

use std::f64::consts::LN_2;

/// Decay factor after `elapsed_ms` without access.
///
/// The half-life stretches by `reinforcement` per useful confirmation, so
/// chunks that keep proving useful fade more slowly. Never drops below
/// `floor`; a historically useful chunk keeps residual value.
pub fn recency_decay(
    elapsed_ms: u64,
    half_life_ms: u64,
    useful_count: u64,
    reinforcement: f64,
    floor: f64,
) -> f64 {
    let effective_half_life =
        (half_life_ms.max(1) as f64) * (1.0 + useful_count as f64 * reinforcement);
    let decay = (-(elapsed_ms as f64) * LN_2 / effective_half_life).exp();
    decay.clamp(floor, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_is_one() {
        assert_eq!(recency_decay(0, 30_000, 0, 0.3, 0.01), 1.0);
    }

    #[test]
    fn one_half_life_halves() {
        let d = recency_decay(30_000, 30_000, 0, 0.3, 0.01);
        assert!((d - 0.5).abs() < 1e-12);
    }

    #[test]
    fn reinforcement_slows_decay() {
        let plain = recency_decay(60_000, 30_000, 0, 0.3, 0.01);
        let reinforced = recency_decay(60_000, 30_000, 5, 0.3, 0.01);
        assert!(reinforced > plain);
    }

    #[test]
    fn floor_holds_for_ancient_chunks() {
        assert_eq!(recency_decay(u64::MAX, 30_000, 0, 0.3, 0.01), 0.01);
    }
}
