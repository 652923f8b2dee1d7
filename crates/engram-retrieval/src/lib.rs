//! # engram-retrieval
//!
//! Scores stored chunks against a query signature and picks the top-K.
//! Pure: the caller (the memory store) owns and applies the access
//! bookkeeping that retrieval implies.

pub mod ranking;
pub mod retriever;
pub mod similarity;
pub mod window;

pub use ranking::{Candidate, RankedCandidate};
pub use retriever::Retriever;
