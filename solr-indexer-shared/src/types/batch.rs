//! Batch partitioning and execution policy for indexers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DescriptorError;

/// Partition of one leaf corpus across `count` cooperating workers.
///
/// Windows are a pure function of `(number, count, total)`: workers that agree
/// on `count` need no other coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDescriptor {
    count: u64,
    number: u64,
}

impl BatchDescriptor {
    /// Create a descriptor for batch `number` (zero based) out of `count`.
    pub fn new(count: u64, number: u64) -> Result<Self, DescriptorError> {
        if count == 0 || number >= count {
            return Err(DescriptorError::InvalidBatch { count, number });
        }
        Ok(Self { count, number })
    }

    /// The whole corpus as one batch.
    pub fn single() -> Self {
        Self { count: 1, number: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn is_last(&self) -> bool {
        self.number == self.count - 1
    }

    /// Compute the `(offset, limit)` window of this batch over `total` items.
    ///
    /// Every batch but the last spans `ceil(total / count)` items; the last one
    /// absorbs the remainder. Windows starting past the end are empty.
    pub fn window(&self, total: u64) -> (u64, u64) {
        if self.count == 1 {
            return (0, total);
        }

        let limit = total.div_ceil(self.count);
        let offset = self.number * limit;
        let available = total.saturating_sub(offset);

        if self.is_last() {
            (offset, available)
        } else {
            (offset, limit.min(available))
        }
    }
}

impl Default for BatchDescriptor {
    fn default() -> Self {
        Self::single()
    }
}

impl fmt::Display for BatchDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number + 1, self.count)
    }
}

/// How an indexer reacts to engine and mapping failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Log and swallow failures. Used by asynchronous message handlers so one
    /// bad item cannot poison the consumer loop.
    #[default]
    BestEffort,
    /// Propagate failures to the caller. Used by administrative operations.
    Strict,
}

impl ExecutionMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, ExecutionMode::Strict)
    }
}
