//! Sequence codec library for the TellMe command recommender
//!
//! This library turns a list of recently clicked commands into the fixed-shape
//! tensors consumed by the scoring engine, and turns the engine's top-K output
//! tensors back into command identifiers. It provides:
//!
//! - tables: input/output index tables and the sequence length, loaded once
//! - sequence: event encoding into index and decay-weighted timing series
//! - ranking: top-K decoding of engine outputs
//! - engine: the scoring engine seam and a fixed local stand-in
//! - predictor: the timed encode -> infer -> decode round trip

pub mod constants;
pub mod engine;
pub mod predictor;
pub mod ranking;
pub mod sequence;
pub mod tables;

/// External command identifier, stable across training and serving
pub type CommandId = i64;

/// Dense 0-based index used inside the engine's tensors
pub type DenseIndex = i64;

/// One observed command click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub id: CommandId,        // External command identifier
    pub elapsed_seconds: f64, // Seconds since the click happened, >= 0
}

impl Event {
    /// Create a new event
    pub fn new(id: CommandId, elapsed_seconds: f64) -> Self {
        Self {
            id,
            elapsed_seconds,
        }
    }
}

pub use engine::{FixedScoringEngine, ScoringEngine, ScoringTensor};
pub use predictor::{DecodedOutput, PredictorConfig, SequencePredictor};
pub use ranking::RankedCommand;
pub use sequence::EncodedInput;
pub use tables::{IndexMap, ModelTables, ReverseIndexMap};
