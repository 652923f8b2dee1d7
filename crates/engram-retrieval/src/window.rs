//! Optional temporal window over retrieval candidates.

use engram_core::models::TimestampMs;

/// Keep items that ended at most `window_ms` before `at`. When nothing
/// qualifies, or there is no window, every item stays a candidate.
pub fn within_window<T>(
    items: Vec<T>,
    end_time: impl Fn(&T) -> TimestampMs,
    at: TimestampMs,
    window_ms: Option<u64>,
) -> Vec<T> {
    let Some(window_ms) = window_ms else {
        return items;
    };
    if !items.iter().any(|item| at.saturating_sub(end_time(item)) <= window_ms) {
        return items;
    }
    items
        .into_iter()
        .filter(|item| at.saturating_sub(end_time(item)) <= window_ms)
        .collect()
}
