//! Rank-2 tensors exchanged with the scoring engine

use burn::tensor::{Int, Tensor, TensorData};
use burn_ndarray::{NdArray, NdArrayDevice};

use super::error::EngineError;

pub type Backend = NdArray<f32>;
pub type Device = NdArrayDevice;

/// Integer or float tensor of shape `[rows, cols]`
#[derive(Debug, Clone)]
pub enum ScoringTensor {
    Int(Tensor<Backend, 2, Int>),
    Float(Tensor<Backend, 2>),
}

impl ScoringTensor {
    /// Integer tensor of shape `[1, values.len()]`
    pub fn int_row(values: Vec<i64>, device: &Device) -> Self {
        let len = values.len();
        let data = TensorData::new(values, [1, len]);
        ScoringTensor::Int(Tensor::from_data(data, device))
    }

    /// Float tensor of shape `[1, values.len()]`
    pub fn float_row(values: Vec<f32>, device: &Device) -> Self {
        let len = values.len();
        let data = TensorData::new(values, [1, len]);
        ScoringTensor::Float(Tensor::from_data(data, device))
    }

    pub fn dims(&self) -> [usize; 2] {
        match self {
            ScoringTensor::Int(t) => t.dims(),
            ScoringTensor::Float(t) => t.dims(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScoringTensor::Int(_) => "int",
            ScoringTensor::Float(_) => "float",
        }
    }

    /// Flatten an integer tensor into row-major values
    pub fn into_int_vec(self, name: &str) -> Result<Vec<i64>, EngineError> {
        match self {
            ScoringTensor::Int(t) => t
                .into_data()
                .convert::<i64>()
                .to_vec::<i64>()
                .map_err(|e| EngineError::TensorData(format!("{name}: {e:?}"))),
            other => Err(EngineError::WrongKind {
                name: name.to_string(),
                expected: "int",
                actual: other.kind(),
            }),
        }
    }

    /// Flatten a float tensor into row-major values
    pub fn into_float_vec(self, name: &str) -> Result<Vec<f32>, EngineError> {
        match self {
            ScoringTensor::Float(t) => t
                .into_data()
                .convert::<f32>()
                .to_vec::<f32>()
                .map_err(|e| EngineError::TensorData(format!("{name}: {e:?}"))),
            other => Err(EngineError::WrongKind {
                name: name.to_string(),
                expected: "float",
                actual: other.kind(),
            }),
        }
    }
}
