//! Error types for the shared descriptors.

use thiserror::Error;

/// Errors raised while building or parsing shared descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// A class name that does not match any content kind.
    #[error("Unknown content kind: {0}")]
    UnknownKind(String),

    /// A batch descriptor that cannot partition a corpus.
    #[error("Invalid batch descriptor: batch number {number} of {count}")]
    InvalidBatch { count: u64, number: u64 },
}
