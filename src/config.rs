//! Construction parameters for the index structures.

use crate::double_hash::MIN_CAPACITY;
use crate::error::{IndexError, Result};

/// Configuration for [`CategoryIndex`](crate::CategoryIndex) and
/// [`DoubleHashTable`](crate::DoubleHashTable).
///
/// Both structures have a fixed size for their whole lifetime; pick the
/// numbers with the expected population in mind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Number of chaining buckets in the category index
    pub bucket_count: usize,
    /// Number of slots in the name table; a prime keeps every probe sequence full-cycle
    pub table_capacity: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            bucket_count: 16,
            table_capacity: 101,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(IndexError::InvalidBucketCount);
        }
        if self.table_capacity < MIN_CAPACITY {
            return Err(IndexError::InvalidCapacity {
                capacity: self.table_capacity,
                minimum: MIN_CAPACITY,
            });
        }
        Ok(())
    }
}
