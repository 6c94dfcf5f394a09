//! Fixed-ranking scoring engine
//!
//! Stands in for the real engine when running a model locally or in tests.
//! It validates its inputs the way the engine contract requires and always
//! returns the same ranking, whatever the encoded history.

use tracing::debug;

use crate::DenseIndex;
use crate::constants::tensors;
use crate::tables::ReverseIndexMap;

use super::error::EngineError;
use super::tensor::{Device, ScoringTensor};
use super::{NamedTensor, ScoringEngine};

/// Scoring engine returning a preset ranking
#[derive(Debug, Clone)]
pub struct FixedScoringEngine {
    /// Ranked dense output indices
    indices: Vec<DenseIndex>,

    /// Probabilities aligned with `indices`
    probabilities: Vec<f32>,

    /// Expected input length, checked when set
    sequence_length: Option<usize>,

    device: Device,
}

impl FixedScoringEngine {
    /// Engine returning `indices` with their `probabilities`
    pub fn new(indices: Vec<DenseIndex>, probabilities: Vec<f32>) -> Self {
        Self {
            indices,
            probabilities,
            sequence_length: None,
            device: Device::default(),
        }
    }

    /// Rank the `k` lowest output indices with probability `1/k` each
    pub fn uniform(output_map: &ReverseIndexMap, k: usize) -> Self {
        let indices: Vec<DenseIndex> = output_map.sorted_indices().into_iter().take(k).collect();
        let probability = if indices.is_empty() {
            0.0
        } else {
            1.0 / indices.len() as f32
        };
        let probabilities = vec![probability; indices.len()];
        Self::new(indices, probabilities)
    }

    /// Require both inputs to have shape `[1, sequence_length]`
    pub fn with_sequence_length(mut self, sequence_length: usize) -> Self {
        self.sequence_length = Some(sequence_length);
        self
    }

    fn check_input(
        &self,
        inputs: &[NamedTensor],
        name: &str,
        expected_kind: &'static str,
    ) -> Result<[usize; 2], EngineError> {
        let (_, tensor) = inputs
            .iter()
            .find(|(input_name, _)| input_name == name)
            .ok_or_else(|| EngineError::MissingInput(name.to_string()))?;

        if tensor.kind() != expected_kind {
            return Err(EngineError::WrongKind {
                name: name.to_string(),
                expected: expected_kind,
                actual: tensor.kind(),
            });
        }

        let dims = tensor.dims();
        let expected_cols = self.sequence_length.unwrap_or(dims[1]);
        if dims[0] != 1 || dims[1] != expected_cols {
            return Err(EngineError::ShapeMismatch {
                name: name.to_string(),
                expected: [1, expected_cols],
                actual: dims,
            });
        }

        Ok(dims)
    }
}

impl ScoringEngine for FixedScoringEngine {
    fn run(
        &self,
        inputs: Vec<NamedTensor>,
        output_names: &[&str],
    ) -> Result<Vec<ScoringTensor>, EngineError> {
        let index_dims = self.check_input(&inputs, tensors::INPUT_INDEX, "int")?;
        let timing_dims = self.check_input(&inputs, tensors::INPUT_TIMING, "float")?;
        if index_dims != timing_dims {
            return Err(EngineError::ShapeMismatch {
                name: tensors::INPUT_TIMING.to_string(),
                expected: index_dims,
                actual: timing_dims,
            });
        }

        debug!(
            sequence_length = index_dims[1],
            ranked = self.indices.len(),
            "Fixed engine scoring request"
        );

        output_names
            .iter()
            .map(|&name| match name {
                tensors::OUTPUT_INDEX => Ok(ScoringTensor::int_row(
                    self.indices.clone(),
                    &self.device,
                )),
                tensors::OUTPUT_PROBABILITY => Ok(ScoringTensor::float_row(
                    self.probabilities.clone(),
                    &self.device,
                )),
                other => Err(EngineError::MissingOutput(other.to_string())),
            })
            .collect()
    }
}
