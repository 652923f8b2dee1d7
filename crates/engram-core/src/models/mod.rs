mod chunk;
mod event;
mod feedback;
mod query;
mod signature;
mod statistics;
mod summary;
mod valuation;
mod window;

pub use chunk::{Chunk, ChunkId, ChunkOrigin, Provenance, UsageStats};
pub use event::{is_present, Event};
pub use feedback::FeedbackOutcome;
pub use query::QuerySignature;
pub use signature::{Feature, FeatureKind, Signature, SIGNATURE_TOP_N};
pub use statistics::{BankStatistics, ChunkStatistics};
pub use summary::ChunkSummary;
pub use valuation::{ValueComponents, ValueContext, ValueEstimate};
pub use window::EventWindow;

/// Monotonic timestamp in milliseconds.
pub type TimestampMs = u64;
