//! Error types for U-Packing.

use thiserror::Error;

/// Result type alias for U-Packing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during packing operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid dimension or item definition.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Invalid container definition.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Extreme point with inverted or negative bounds.
    #[error("Invalid extreme point: {0}")]
    InvalidPoint(String),

    /// Placement that does not match the addressed extreme point.
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    /// Fold that would leave the bag with a negative extent.
    #[error("Invalid fold: {0}")]
    InvalidFold(String),

    /// A stack constraint failed while being consulted.
    #[error("Constraint failed: {0}")]
    Constraint(String),

    /// Computation cancelled.
    #[error("Computation cancelled")]
    Cancelled,

    /// Timeout exceeded.
    #[error("Timeout exceeded after {0}ms")]
    Timeout(u64),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
