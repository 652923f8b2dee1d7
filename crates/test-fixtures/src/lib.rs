//! Shared fixtures for engram tests and benches.

use std::sync::Once;

use engram_chunking::EventStreamIndex;
use engram_core::models::{Event, QuerySignature, Signature};
use tracing_subscriber::EnvFilter;

static LOGGING: Once = Once::new();

/// Route `tracing` output through the test harness. `RUST_LOG` overrides
/// the default `warn` level. Safe to call from every test.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub const PAGES: [&str; 3] = ["home", "search", "checkout"];
pub const WIDGETS: [&str; 6] = ["search_box", "results", "filter", "cart", "pay", "nav"];
pub const OPERATIONS: [&str; 3] = ["click", "type", "scroll"];

/// A deterministic session: `n` events spaced `step_ms` apart, cycling
/// through the fixture vocabularies at coprime strides.
pub fn session(n: usize, step_ms: u64) -> Vec<Event> {
    (0..n)
        .map(|i| {
            Event::new(
                i as u64 * step_ms,
                PAGES[(i / 10) % PAGES.len()],
                WIDGETS[i % WIDGETS.len()],
                OPERATIONS[(i / 2) % OPERATIONS.len()],
            )
        })
        .collect()
}

pub fn session_index(participant: &str, n: usize, step_ms: u64) -> EventStreamIndex {
    EventStreamIndex::new(participant, session(n, step_ms))
}

/// `n` events that all share one page, widget and operation.
pub fn uniform_events(start: u64, n: usize, page: &str, widget: &str, op: &str) -> Vec<Event> {
    (0..n)
        .map(|i| Event::new(start + i as u64, page, widget, op))
        .collect()
}

pub fn signature(pages: &[&str], widgets: &[&str], ops: &[&str]) -> Signature {
    let owned = |xs: &[&str]| xs.iter().map(|x| x.to_string()).collect();
    Signature::new(owned(pages), owned(widgets), owned(ops))
}

pub fn query(pages: &[&str], widgets: &[&str], ops: &[&str], at: u64) -> QuerySignature {
    QuerySignature::new(signature(pages, widgets, ops), at)
}
