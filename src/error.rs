use thiserror::Error;

/// Invalid arguments given when building or reconfiguring a map.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    /// The initial capacity does not cover a single neighborhood.
    #[error("initial capacity {capacity} is smaller than the neighborhood size {minimum}")]
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
        /// The smallest accepted capacity
        minimum: usize,
    },
    /// The default hash function was selected for a key type without a
    /// contiguous byte representation.
    #[error("the default hash function accepts only contiguously laid out keys")]
    InvalidKeyType,
    /// Load factors outside `(0, 1]`, or `min >= max`.
    #[error("invalid load factors: max {max}, min {min}")]
    InvalidLoadFactors {
        /// The rejected upper bound
        max: f64,
        /// The rejected lower bound
        min: f64,
    },
}

/// The table could not find room for an entry.
///
/// The failing operation is aborted. No entry is lost: a failed insertion
/// leaves every previously stored entry in place, and a failed resize leaves
/// the table exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityExhausted {
    /// No free slot could be brought into the neighborhood of `home`.
    #[error("no free slot reachable from home slot {home} (capacity {capacity})")]
    InsertionFailed {
        /// Home slot of the key being inserted
        home: usize,
        /// Capacity of the table at the time of the failure
        capacity: usize,
    },
    /// Some entry could not be re-seated while resizing.
    #[error("entries could not be re-seated into {capacity} slots")]
    ResizeFailed {
        /// The capacity the table was being resized to
        capacity: usize,
    },
}

/// Errors returned by [`HashMap`](crate::HashMap) operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// See [`CapacityExhausted`].
    #[error(transparent)]
    CapacityExhausted(#[from] CapacityExhausted),
}

/// Result type alias for map operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
