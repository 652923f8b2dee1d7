//! End-to-end behaviour of a single participant's bank.

use engram_bank::{FeedbackSink, MemoryStore, Offer, PromotionPolicy, ReasoningOutcome};
use engram_chunking::chunk_window;
use engram_core::config::BankConfig;
use engram_core::models::{ChunkId, ChunkStatistics, EventWindow};
use engram_core::traits::IMemoryBank;
use test_fixtures::{init_test_logging, query, uniform_events};

/// Chunks whose feedback outran their accesses.
fn usefulness_violations(stats: &[ChunkStatistics]) -> Vec<ChunkId> {
    stats
        .iter()
        .filter(|s| s.useful_count > s.access_count)
        .map(|s| s.id.clone())
        .collect()
}

fn insert_uniform(store: &mut MemoryStore, ordinal: usize, start: u64, widget: &str) {
    let events = uniform_events(start, 30, "home", widget, "click");
    let first = ordinal * 30;
    let chunk = chunk_window(
        ChunkId::indexed("p1", ordinal),
        EventWindow::new(first, &events),
    )
    .unwrap();
    store.insert(chunk).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// Eviction
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn oldest_of_three_identical_chunks_is_evicted() {
    init_test_logging();
    let config = BankConfig::with_sizes(30, 2);
    let mut store = MemoryStore::with_config("p1", config).unwrap();

    insert_uniform(&mut store, 0, 0, "search");
    insert_uniform(&mut store, 1, 1_000, "search");
    insert_uniform(&mut store, 2, 2_000, "search");

    let ids: Vec<String> = store.all_chunks().iter().map(|s| s.id.to_string()).collect();
    assert_eq!(ids, vec!["p1_1", "p1_2"]);
}

#[test]
fn identical_sequences_evict_identical_victims() {
    let run = || {
        let mut store = MemoryStore::new("p1", 3).unwrap();
        let mut victims = Vec::new();
        for i in 0..8usize {
            let widget = ["a", "b", "c"][i % 3];
            let events = uniform_events(i as u64 * 500, 10, "home", widget, "click");
            let chunk =
                chunk_window(ChunkId::indexed("p1", i), EventWindow::new(i * 10, &events))
                    .unwrap();
            victims.push(store.insert(chunk).unwrap());
            if i % 2 == 0 {
                store.retrieve(&query(&["home"], &[widget], &["click"], i as u64 * 500 + 20), 2);
            }
        }
        (victims, store.all_chunks())
    };
    assert_eq!(run(), run());
}

// ═══════════════════════════════════════════════════════════════════════════
// Retrieval
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn only_the_overlapping_chunk_is_returned() {
    let mut store = MemoryStore::new("p1", 10).unwrap();
    for (i, (page, widget, op)) in [
        ("home", "search", "click"),
        ("cart", "pay", "type"),
        ("help", "faq", "scroll"),
    ]
    .into_iter()
    .enumerate()
    {
        let events = uniform_events(i as u64 * 100, 5, page, widget, op);
        let chunk =
            chunk_window(ChunkId::indexed("p1", i), EventWindow::new(i * 5, &events)).unwrap();
        store.insert(chunk).unwrap();
    }

    let got = store.retrieve(&query(&["home"], &["search"], &[], 1_000), 5);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id, ChunkId::indexed("p1", 0));
    assert!(got[0].to_string().contains("search"));
}

#[test]
fn empty_store_retrieval_is_empty() {
    let mut store = MemoryStore::new("p1", 10).unwrap();
    let got = IMemoryBank::retrieve(&mut store, &query(&["home"], &[], &[], 10), 5).unwrap();
    assert!(got.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Feedback
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn direct_double_feedback_is_flagged() {
    let mut store = MemoryStore::new("p1", 10).unwrap();
    insert_uniform(&mut store, 0, 0, "search");
    let id = ChunkId::indexed("p1", 0);

    store.retrieve(&query(&["home"], &["search"], &["click"], 100), 5);
    store.record_feedback(&id, true);
    store.record_feedback(&id, true);

    let stats = store.all_chunks();
    assert_eq!(stats[0].useful_count, 2);
    assert_eq!(stats[0].access_count, 1);
    assert_eq!(usefulness_violations(&stats), vec![id]);
}

#[test]
fn feedback_through_sink_keeps_useful_within_accesses() {
    let mut store = MemoryStore::new("p1", 10).unwrap();
    insert_uniform(&mut store, 0, 0, "search");
    insert_uniform(&mut store, 1, 500, "cart");
    let sink = FeedbackSink::default();

    for step in 0..5u64 {
        let q = query(&["home"], &["search"], &["click"], 1_000 + step);
        let offer = Offer::retrieve(&mut store, &q, 5).unwrap();
        assert_eq!(offer.len(), 2);
        let outcome = ReasoningOutcome::new().with_evidence(["0..29"]);
        let report = sink.apply(&mut store, offer, &outcome).unwrap();
        assert_eq!(report.credited, 1);
    }

    let stats = store.all_chunks();
    assert!(usefulness_violations(&stats).is_empty());
    assert_eq!(stats[0].useful_count, 5);
    assert_eq!(stats[1].useful_count, 0);
    assert_eq!(stats[1].recent_rewards, vec![0.0; 5]);
}

#[test]
fn feedback_after_eviction_is_stale_not_error() {
    let mut store = MemoryStore::new("p1", 1).unwrap();
    insert_uniform(&mut store, 0, 0, "search");
    let offer = Offer::retrieve(&mut store, &query(&["home"], &["search"], &[], 10), 1).unwrap();
    insert_uniform(&mut store, 1, 90_000, "cart");

    let report = FeedbackSink::default()
        .apply(
            &mut store,
            offer,
            &ReasoningOutcome::new().with_evidence(["3"]),
        )
        .unwrap();
    assert_eq!(report.stale, 1);
}

#[test]
fn offer_from_another_store_is_never_credited() {
    let mut retrieved_here = MemoryStore::new("p1", 10).unwrap();
    let mut never_retrieved = MemoryStore::new("p1", 10).unwrap();
    insert_uniform(&mut retrieved_here, 0, 0, "search");
    insert_uniform(&mut never_retrieved, 0, 0, "search");

    let q = query(&["home"], &["search"], &["click"], 100);
    let offer = Offer::retrieve(&mut retrieved_here, &q, 5).unwrap();
    let report = FeedbackSink::default()
        .apply(
            &mut never_retrieved,
            offer,
            &ReasoningOutcome::new().with_evidence(["0..29"]),
        )
        .unwrap();

    assert_eq!(report.credited, 0);
    assert_eq!(report.acknowledged, 1);
    let stats = never_retrieved.all_chunks();
    assert_eq!((stats[0].useful_count, stats[0].access_count), (0, 0));
    assert!(usefulness_violations(&stats).is_empty());
}

#[test]
fn out_of_band_credit_caps_later_offers() {
    let mut store = MemoryStore::new("p1", 10).unwrap();
    insert_uniform(&mut store, 0, 0, "search");
    let id = ChunkId::indexed("p1", 0);
    let sink = FeedbackSink::default();
    let outcome = ReasoningOutcome::new().with_evidence(["5"]);

    let q = query(&["home"], &["search"], &["click"], 100);
    let offer = Offer::retrieve(&mut store, &q, 1).unwrap();
    store.record_feedback(&id, true);
    let report = sink.apply(&mut store, offer, &outcome).unwrap();
    assert_eq!(report.credited, 0);

    let q = query(&["home"], &["search"], &["click"], 200);
    let offer = Offer::retrieve(&mut store, &q, 1).unwrap();
    let report = sink.apply(&mut store, offer, &outcome).unwrap();
    assert_eq!(report.credited, 1);

    let usage = store.usage(&id).unwrap();
    assert_eq!((usage.useful_count, usage.access_count), (2, 2));
}

// ═══════════════════════════════════════════════════════════════════════════
// Promotion
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn unused_promoted_chunk_falls_behind_reinforced_twin() {
    init_test_logging();
    let policy = PromotionPolicy::default();
    assert!(policy.should_promote(0.9));

    let window = uniform_events(1_000, 10, "home", "search", "click");
    let mut reinforced = MemoryStore::new("p1", 10).unwrap();
    let mut neglected = MemoryStore::new("p1", 10).unwrap();
    let id = reinforced.promote(EventWindow::new(0, &window), 0.9).unwrap();
    assert_eq!(neglected.promote(EventWindow::new(0, &window), 0.9).unwrap(), id);

    let sink = FeedbackSink::default();
    let mut previous = f64::INFINITY;
    for step in 1..=6u64 {
        let at = 1_000 + step * 20_000;
        let q = query(&["home"], &["search"], &["click"], at);
        let offer = Offer::retrieve(&mut reinforced, &q, 1).unwrap();
        sink.apply(
            &mut reinforced,
            offer,
            &ReasoningOutcome::new().with_evidence(["0..9"]),
        )
        .unwrap();
        // Advances the clock without touching the chunk.
        neglected.retrieve(&query(&["elsewhere"], &[], &[], at), 1);

        let kept = reinforced.statistics_for(&id).unwrap().estimated_value;
        let faded = neglected.statistics_for(&id).unwrap().estimated_value;
        assert!(faded < kept, "step {step}: {faded} !< {kept}");
        assert!(faded < previous);
        previous = faded;
    }
}

#[test]
fn promotion_respects_capacity() {
    let mut store = MemoryStore::new("p1", 2).unwrap();
    for i in 0..5u64 {
        let window = uniform_events(i * 1_000, 4, "home", "search", "click");
        store.promote(EventWindow::new(0, &window), 0.95).unwrap();
        assert!(store.len() <= 2);
    }
    assert!(store.all_chunks().iter().all(|s| s.id.is_promoted()));
}

// ═══════════════════════════════════════════════════════════════════════════
// Reporting
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn statistics_records_serialize_for_reporting() {
    let mut store = MemoryStore::new("p1", 10).unwrap();
    insert_uniform(&mut store, 0, 0, "search");
    store.retrieve(&query(&["home"], &["search"], &["click"], 100), 5);
    store.record_feedback(&ChunkId::indexed("p1", 0), true);

    let stats = store.all_chunks();
    let json = serde_json::to_string(&stats).unwrap();
    assert!(json.contains("\"access_count\":1"));
    let back: Vec<ChunkStatistics> = serde_json::from_str(&json).unwrap();
    assert_eq!(back[0].id, stats[0].id);
    assert_eq!(back[0].useful_count, 1);
    assert_eq!(back[0].recent_rewards, vec![1.0]);

    let aggregate = serde_json::to_value(store.statistics()).unwrap();
    assert_eq!(aggregate["total_chunks"], 1);
}
