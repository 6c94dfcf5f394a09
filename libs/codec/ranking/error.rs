use thiserror::Error;

use crate::DenseIndex;
use crate::engine::EngineError;

/// Error types for decoding engine outputs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// Fewer ranked entries than requested
    #[error("Need {required} ranked entries, got {indices} indices and {probabilities} probabilities")]
    OutOfRange {
        required: usize,
        indices: usize,
        probabilities: usize,
    },

    /// Engine index unknown to the output table; training and serving tables disagree
    #[error("No command mapped to output index {0}")]
    Lookup(DenseIndex),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
