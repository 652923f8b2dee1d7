//! # engram-chunking
//!
//! Turns a participant's behavioral log into long-term memory material:
//! an ordered, read-only event index with windowed slicing, a fixed-size
//! chunker, and the frequency-ranked signatures chunks are compared by.

pub mod chunker;
pub mod index;
pub mod signature;

pub use chunker::{chunk_window, Chunker};
pub use index::EventStreamIndex;
pub use signature::{extract_signature, query_from_window};
