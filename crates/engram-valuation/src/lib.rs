//! # engram-valuation
//!
//! Value estimation for stored chunks. Each chunk is treated as an arm of a
//! multi-armed bandit: retrieval pulls it, downstream feedback rewards it.
//!
//! `estimated_value` (proven value, drives eviction) blends three factors:
//! - usage rate: useful / accessed, neutral prior when never accessed
//! - recency: exponential decay since last access, floored
//! - rarity: fewer signature overlaps with the rest of the store is better
//!
//! `confidence_bound` (UCB exploration bonus, drives retrieval ranking only)
//! shrinks as a chunk's access count grows.

pub mod engine;
pub mod factors;

pub use engine::ValueEngine;
