//! Error types for find_bench

use thiserror::Error;

/// Result type alias for find_bench operations
pub type Result<T> = std::result::Result<T, FindError>;

/// A caller contract that a kernel relies on but does not check in release builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    /// The buffer is not sorted in non-decreasing order.
    #[error("buffer is not sorted: element {index} is smaller than its predecessor")]
    Unsorted {
        /// Index of the first element that breaks the order
        index: usize,
    },

    /// The target does not occur in the buffer.
    #[error("target {target} is not present in the buffer")]
    TargetAbsent {
        /// The value that was searched for
        target: i32,
    },
}

/// Error types that can occur in find_bench
#[derive(Debug, Error)]
pub enum FindError {
    /// A kernel precondition was violated
    #[error("invalid precondition: {0}")]
    InvalidPrecondition(#[from] Precondition),

    /// Range thresholds out of order
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Malformed range configuration
    #[error("invalid range configuration: {0}")]
    Config(#[from] serde_json::Error),
}
