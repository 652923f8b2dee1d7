mod engram_error;

pub use engram_error::{EngramError, EngramResult};
