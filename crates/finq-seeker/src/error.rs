//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when executing a filter request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekerError {
    /// Pages are 1-based; page 0 does not exist.
    #[error("invalid page {0}: pages start at 1")]
    InvalidPage(usize),

    /// An explicit page size must be at least one record.
    #[error("invalid page size {0}: must be at least 1")]
    InvalidPageSize(usize),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
