pub mod bank_config;
pub mod defaults;

pub use bank_config::{BankConfig, SimilarityMode, ValueWeights};
