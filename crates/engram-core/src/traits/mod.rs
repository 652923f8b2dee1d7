mod memory_bank;
mod value_estimator;

pub use memory_bank::IMemoryBank;
pub use value_estimator::IValueEstimator;
