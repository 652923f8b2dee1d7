//! # engram-bank
//!
//! The adaptive long-term memory of one participant.
//!
//! A [`MemoryStore`] holds at most `capacity` chunks. Chunks arrive from the
//! chunker at load time ([`build`]), incrementally as anchors advance
//! ([`ChunkCursor`]), or by promotion of a confident short-term window.
//! Retrieval ranks chunks by signature similarity boosted by a UCB
//! exploration bonus and records every returned chunk as accessed; the
//! [`FeedbackSink`] later credits the ones the reasoning step actually used.
//! When the store overflows, the chunk with the lowest proven value goes.
//!
//! ```text
//! EventStreamIndex ──chunk──▶ MemoryStore ◀──promote── STM window
//!                               │    ▲
//!                     retrieve  │    │ record_feedback
//!                               ▼    │
//!                      ChunkSummary ─▶ FeedbackSink
//! ```

pub mod build;
pub mod cursor;
pub mod eviction;
pub mod feedback;
pub mod promotion;
pub mod registry;
pub mod shared;
pub mod store;

pub use build::{build, build_with_config};
pub use cursor::ChunkCursor;
pub use feedback::{EvidenceRef, FeedbackReport, FeedbackSink, Offer, ReasoningOutcome};
pub use promotion::PromotionPolicy;
pub use registry::ParticipantBanks;
pub use shared::SharedMemoryStore;
pub use store::MemoryStore;
