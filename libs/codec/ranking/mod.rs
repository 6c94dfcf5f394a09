//! Top-K decoding of engine outputs
//!
//! Maps the engine's ranked dense output indices back to external command
//! ids through the reverse index table, keeping the engine's order.

pub mod decoder;
pub mod error;

pub use decoder::{RankedCommand, decode, decode_tensors};
pub use error::DecodeError;
