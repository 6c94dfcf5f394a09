use tracing::warn;

use crate::constants::tensors;
use crate::engine::ScoringTensor;
use crate::tables::ReverseIndexMap;
use crate::{CommandId, DenseIndex};

use super::error::DecodeError;

/// One recommended command with its predicted probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCommand {
    pub command: CommandId,
    pub probability: f32,
}

/// Decode the first `k` ranked entries
///
/// The engine is expected to rank its output already; the order is kept as-is
/// and a warning is logged when probabilities are not descending.
pub fn decode(
    indices: &[DenseIndex],
    probabilities: &[f32],
    output_map: &ReverseIndexMap,
    k: usize,
) -> Result<Vec<RankedCommand>, DecodeError> {
    if indices.len() < k || probabilities.len() < k {
        return Err(DecodeError::OutOfRange {
            required: k,
            indices: indices.len(),
            probabilities: probabilities.len(),
        });
    }

    let probabilities = &probabilities[..k];
    if probabilities.windows(2).any(|pair| pair[0] < pair[1]) {
        warn!(?probabilities, "Engine output is not ranked by descending probability");
    }

    indices[..k]
        .iter()
        .zip(probabilities)
        .map(|(&index, &probability)| -> Result<RankedCommand, DecodeError> {
            let command = output_map
                .lookup(index)
                .ok_or(DecodeError::Lookup(index))?;
            Ok(RankedCommand {
                command,
                probability,
            })
        })
        .collect()
}

/// Decode the engine's `index` and `probability` output tensors
pub fn decode_tensors(
    index: ScoringTensor,
    probability: ScoringTensor,
    output_map: &ReverseIndexMap,
    k: usize,
) -> Result<Vec<RankedCommand>, DecodeError> {
    let indices = index.into_int_vec(tensors::OUTPUT_INDEX)?;
    let probabilities = probability.into_float_vec(tensors::OUTPUT_PROBABILITY)?;
    decode(&indices, &probabilities, output_map, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Device;

    fn table() -> ReverseIndexMap {
        ReverseIndexMap::from_entries([(0, 100), (1, 200), (2, 300)])
    }

    #[test]
    fn test_decode_keeps_engine_order() {
        let ranked = decode(&[2, 0, 1], &[0.5, 0.3, 0.2], &table(), 3).unwrap();
        let commands: Vec<CommandId> = ranked.iter().map(|r| r.command).collect();
        assert_eq!(commands, vec![300, 100, 200]);
        assert_eq!(ranked[0].probability, 0.5);
    }

    #[test]
    fn test_decode_only_first_k() {
        let ranked = decode(&[1, 0, 99], &[0.6, 0.4, 0.0], &table(), 2).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_unsorted_output_is_not_resorted() {
        let ranked = decode(&[0, 1], &[0.1, 0.9], &table(), 2).unwrap();
        assert_eq!(ranked[0].command, 100);
        assert_eq!(ranked[1].command, 200);
    }

    #[test]
    fn test_decode_tensors() {
        let device = Device::default();
        let index = ScoringTensor::int_row(vec![1, 2], &device);
        let probability = ScoringTensor::float_row(vec![0.7, 0.3], &device);

        let ranked = decode_tensors(index, probability, &table(), 2).unwrap();
        assert_eq!(ranked[0], RankedCommand { command: 200, probability: 0.7 });
        assert_eq!(ranked[1], RankedCommand { command: 300, probability: 0.3 });
    }

    #[test]
    fn test_decode_tensors_swapped_kinds() {
        let device = Device::default();
        let index = ScoringTensor::float_row(vec![1.0], &device);
        let probability = ScoringTensor::float_row(vec![1.0], &device);

        let result = decode_tensors(index, probability, &table(), 1);
        assert!(matches!(result, Err(DecodeError::Engine(_))));
    }
}
