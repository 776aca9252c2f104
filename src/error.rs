use thiserror::Error;

/// Errors raised by the projection, filtering and reconstruction stages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TomographyError {
    /// Grid shape unusable for the operation (non-square image, size below 2,
    /// or a sinogram whose detector axis does not match the image size).
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Scalar argument outside its domain, e.g. a zero angle count.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two lengths that must agree differ.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Coordinate or index outside the sampled lattice.
    #[error("coordinate out of range: {0}")]
    OutOfRange(String),

    /// The computation was stopped through its abort flag.
    #[error("computation aborted")]
    Aborted,
}
