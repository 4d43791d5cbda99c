/// Analysis modules — folding observations and flagging outliers.

pub mod aggregator;
pub mod thresholds;

pub use aggregator::Aggregator;
pub use thresholds::{classify, Classification};
