//! The individual value terms, as pure functions.

pub mod exploration;
pub mod rarity;
pub mod recency;
pub mod usage;
