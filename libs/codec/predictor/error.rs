//! Error types for the predictor
//!
//! Wraps the failure of each stage so callers can tell encoding, scoring and
//! decoding problems apart.

use thiserror::Error;

use crate::engine::EngineError;
use crate::ranking::DecodeError;
use crate::sequence::EncodeError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictorError {
    #[error("Invalid predictor configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Decoding failed: {0}")]
    Decode(#[from] DecodeError),
}
