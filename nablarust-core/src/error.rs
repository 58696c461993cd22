use thiserror::Error;

/// Custom error type for the NablaRust framework.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum NablaRustError {
    #[error("the axis to reduce along must be in range (-{rank}, {rank}), but got {axis} instead")]
    AxisOutOfRange { axis: isize, rank: usize },

    #[error("the number of axes to reduce along must be <= input rank {rank}, but got {requested} instead")]
    AxisCountExceeded { requested: usize, rank: usize },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Unknown operation: {0}")]
    UnknownOp(String),

    #[error("Invalid arguments for operation '{operation}': {message}")]
    InvalidArguments { operation: String, message: String },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
