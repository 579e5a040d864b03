//! Error type shared by every index structure.
//!
//! Lookups that find nothing return `None`; only misconfiguration and
//! capacity exhaustion are reported through [`IndexError`].

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The double hashing step is computed modulo `capacity - 2`, which must be positive.
    #[error("invalid table capacity {capacity}: must be at least {minimum}")]
    InvalidCapacity { capacity: usize, minimum: usize },

    #[error("category index needs at least one bucket")]
    InvalidBucketCount,

    /// Every slot on the probe sequence of `name` is occupied.
    #[error("table full: no free slot for {name:?} after probing {capacity} slots (last probe {probes})")]
    TableFull {
        name: String,
        capacity: usize,
        probes: usize,
    },
}
