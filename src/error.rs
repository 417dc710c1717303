//! Error type for the guarded heap operations

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The heap already holds `capacity` elements
    #[error("heap is full (capacity {capacity})")]
    Full {
        /// Capacity the heap was constructed with
        capacity: usize,
    },
}
