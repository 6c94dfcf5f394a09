//! Event sequence encoding
//!
//! Turns a newest-first list of command clicks into the two fixed-length
//! series the scoring engine consumes: dense command indices and recency
//! weights. Short histories are left-padded with zeros and a start marker,
//! long histories keep only the most recent `sequence_length` events.

pub mod encoder;
pub mod error;

pub use encoder::{EncodedInput, decay_weight, encode};
pub use error::EncodeError;
