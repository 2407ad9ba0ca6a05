//! Error types for the engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Construction errors. Stepping a validly constructed universe cannot
/// fail; an internal invariant violation there is a defect, not an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid pattern: expected {expected} cells, got {actual}")]
    InvalidPattern { expected: usize, actual: usize },
}
