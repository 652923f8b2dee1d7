//! Signature extraction: frequency-ranked top-N per category.

use std::collections::HashMap;

use engram_core::models::{
    is_present, Event, QuerySignature, Signature, TimestampMs, SIGNATURE_TOP_N,
};

/// Signature of a run of events.
///
/// Each category keeps its `SIGNATURE_TOP_N` most frequent identifiers;
/// equal counts rank by first appearance within `events`.
pub fn extract_signature(events: &[Event]) -> Signature {
    Signature::new(
        top_ranked(events.iter().map(|e| e.page.as_str())),
        top_ranked(events.iter().map(|e| e.widget.as_str())),
        top_ranked(events.iter().map(|e| e.operation.as_str())),
    )
}

/// Query built from an anchor's local window rather than a single event.
pub fn query_from_window(events: &[Event], at: TimestampMs) -> QuerySignature {
    QuerySignature::new(extract_signature(events), at)
}

fn top_ranked<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    // (count, first-seen position) per identifier.
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, value) in values.filter(|v| is_present(v)).enumerate() {
        tally.entry(value).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = tally
        .into_iter()
        .map(|(value, (count, first_seen))| (value, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(SIGNATURE_TOP_N)
        .map(|(value, _, _)| value.to_string())
        .collect()
}
