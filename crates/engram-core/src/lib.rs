//! # engram-core
//!
//! Shared vocabulary of the Engram adaptive memory bank: behavioral events,
//! chunks and their signatures, usage statistics, valuation records,
//! configuration, the error type, and the trait seams the other crates
//! implement.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

pub use config::BankConfig;
pub use errors::{EngramError, EngramResult};
