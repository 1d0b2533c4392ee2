use thiserror::Error;

/// Top-level error type for the polykern geometry kernel.
#[derive(Debug, Error)]
pub enum PolykernError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by primitive construction and evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("parameter t = {value} is out of range [{min}, {max}]")]
    InvalidParameter { value: f64, min: f64, max: f64 },

    #[error("operands are not skew")]
    NotSkew,

    #[error("operands are not parallel")]
    NotParallel,
}

/// Errors raised by combining operations (addition, union, booleans).
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("operands do not share a boundary: {0}")]
    NotAdjacent(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience type alias for results using [`PolykernError`].
pub type Result<T> = std::result::Result<T, PolykernError>;
