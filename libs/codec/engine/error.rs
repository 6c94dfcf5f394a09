//! Error types for the scoring engine boundary

use thiserror::Error;

/// Errors raised by a scoring engine or while exchanging tensors with it
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A required input tensor was not supplied
    #[error("Missing input tensor '{0}'")]
    MissingInput(String),

    /// A tensor has the wrong element kind
    #[error("Tensor '{name}' must be {expected}, got {actual}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A tensor has an unexpected shape
    #[error("Tensor '{name}' has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: [usize; 2],
        actual: [usize; 2],
    },

    /// The engine cannot produce a requested output
    #[error("Unknown output tensor '{0}'")]
    MissingOutput(String),

    /// Tensor data could not be read back
    #[error("Tensor data conversion failed: {0}")]
    TensorData(String),

    /// Any other failure inside the engine
    #[error("Scoring failed: {0}")]
    Scoring(String),
}
