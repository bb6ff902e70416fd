//! Error types for the Springfall simulators.
//!
//! All crates return `SpringfallResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Springfall simulators.
#[derive(Debug, Error)]
pub enum SpringfallError {
    /// Configuration value is invalid. Rejects construction.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Grid topology is malformed or inconsistent.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// A simulation invariant was violated (non-finite or unbounded state).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, SpringfallError>`.
pub type SpringfallResult<T> = Result<T, SpringfallError>;
