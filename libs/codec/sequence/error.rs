use thiserror::Error;

/// Error types for sequence encoding
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodeError {
    #[error("Invalid sequence length {0} (must be > 0)")]
    InvalidSequenceLength(usize),

    /// Built series do not match the configured length
    #[error("Encoded length mismatch: expected {expected}, got {indices} indices and {timings} timings")]
    LengthMismatch {
        expected: usize,
        indices: usize,
        timings: usize,
    },
}
