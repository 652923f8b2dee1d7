//! Property-based tests for the memory store.
//!
//! - Size never exceeds capacity
//! - useful_count <= access_count when feedback goes through the sink
//! - Retrieval never returns more than k nor zero-similarity chunks
//! - Identical operation sequences produce identical stores

use engram_bank::{FeedbackSink, MemoryStore, Offer, ReasoningOutcome};
use engram_chunking::chunk_window;
use engram_core::models::{ChunkId, ChunkStatistics, Event, EventWindow};
use proptest::prelude::*;
use test_fixtures::query;

const WIDGETS: [&str; 4] = ["search", "cart", "pay", "nav"];

#[derive(Debug, Clone)]
enum Op {
    Insert { widget: usize, gap: u64 },
    Retrieve { widget: usize, k: usize, useful: bool },
    Promote { widget: usize },
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..WIDGETS.len(), 0u64..20_000).prop_map(|(widget, gap)| Op::Insert { widget, gap }),
        (0..WIDGETS.len(), 0usize..4, any::<bool>())
            .prop_map(|(widget, k, useful)| Op::Retrieve { widget, k, useful }),
        (0..WIDGETS.len()).prop_map(|widget| Op::Promote { widget }),
    ]
}

fn events(start: u64, widget: usize) -> Vec<Event> {
    (0..5)
        .map(|i| Event::new(start + i, "home", WIDGETS[widget], "click"))
        .collect()
}

/// Replays `ops`, checking per-step invariants. Returns the final snapshot.
fn replay(capacity: usize, ops: &[Op]) -> Result<Vec<ChunkStatistics>, TestCaseError> {
    let mut store = MemoryStore::new("p1", capacity).unwrap();
    let sink = FeedbackSink::default();
    let mut now = 0u64;
    let mut next = 0usize;

    for op in ops {
        match *op {
            Op::Insert { widget, gap } => {
                now += gap;
                let evs = events(now, widget);
                let chunk = chunk_window(
                    ChunkId::indexed("p1", next),
                    EventWindow::new(next * 5, &evs),
                )
                .unwrap();
                next += 1;
                store.insert(chunk).unwrap();
            }
            Op::Retrieve { widget, k, useful } => {
                now += 100;
                let offer =
                    Offer::retrieve(&mut store, &query(&[], &[WIDGETS[widget]], &[], now), k)
                        .unwrap();
                prop_assert!(offer.len() <= k);
                prop_assert!(offer.summaries().iter().all(|s| s.similarity > 0.0));
                let outcome = if useful {
                    ReasoningOutcome::new().with_evidence(["0..1000000"])
                } else {
                    ReasoningOutcome::new()
                };
                sink.apply(&mut store, offer, &outcome).unwrap();
            }
            Op::Promote { widget } => {
                let evs = events(now, widget);
                store.promote(EventWindow::new(0, &evs), 0.9).unwrap();
            }
        }
        prop_assert!(store.len() <= capacity);
        for s in store.all_chunks() {
            prop_assert!(s.useful_count <= s.access_count, "{}", s.id);
        }
    }
    Ok(store.all_chunks())
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(
        capacity in 1usize..6,
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        replay(capacity, &ops)?;
    }

    #[test]
    fn replay_is_deterministic(
        capacity in 1usize..6,
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        let a = replay(capacity, &ops)?;
        let b = replay(capacity, &ops)?;
        prop_assert_eq!(a, b);
    }

    #[test]
    fn lifetime_accesses_never_decrease(
        capacity in 1usize..4,
        ops in prop::collection::vec(arb_op(), 0..30),
    ) {
        let mut store = MemoryStore::new("p1", capacity).unwrap();
        let mut last = 0u64;
        for (i, op) in ops.iter().enumerate() {
            let now = i as u64 * 1_000;
            match *op {
                Op::Insert { widget, .. } | Op::Promote { widget } => {
                    let evs = events(now, widget);
                    store.promote(EventWindow::new(0, &evs), 0.9).unwrap();
                }
                Op::Retrieve { widget, k, .. } => {
                    store.retrieve(&query(&[], &[WIDGETS[widget]], &[], now), k);
                }
            }
            prop_assert!(store.total_accesses() >= last);
            last = store.total_accesses();
        }
    }
}
