//! Scoring engine seam
//!
//! The model itself is scored by an external engine that consumes named rank-2
//! tensors and produces named rank-2 tensors. This module defines that boundary:
//!
//! - tensor::ScoringTensor: integer or float tensor on the ndarray backend
//! - ScoringEngine: the capability the predictor is given at construction
//! - fixed::FixedScoringEngine: deterministic stand-in for local runs and tests
//! - error::EngineError: failures reported across the boundary

pub mod error;
pub mod fixed;
pub mod tensor;

pub use error::EngineError;
pub use fixed::FixedScoringEngine;
pub use tensor::{Backend, Device, ScoringTensor};

/// A named tensor passed to or returned from the engine
pub type NamedTensor = (String, ScoringTensor);

/// Opaque model scoring engine
///
/// Implementations receive the encoded inputs by name and must return one
/// tensor per requested output name, in the same order.
pub trait ScoringEngine: Send + Sync {
    fn run(
        &self,
        inputs: Vec<NamedTensor>,
        output_names: &[&str],
    ) -> Result<Vec<ScoringTensor>, EngineError>;
}

impl<E: ScoringEngine + ?Sized> ScoringEngine for Box<E> {
    fn run(
        &self,
        inputs: Vec<NamedTensor>,
        output_names: &[&str],
    ) -> Result<Vec<ScoringTensor>, EngineError> {
        (**self).run(inputs, output_names)
    }
}
