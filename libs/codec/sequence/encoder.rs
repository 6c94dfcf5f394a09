use std::iter;

use crate::constants::{
    DECAY_BASE, DECAY_DIVISOR_SECS, PADDING_INDEX, SEQUENCE_START_INDEX, tensors,
};
use crate::engine::{Device, NamedTensor, ScoringTensor};
use crate::tables::IndexMap;
use crate::{DenseIndex, Event};

use super::error::EncodeError;

/// Recency weight of an event: 1.0 when fresh, decaying toward 0
///
/// weight = 10^(-elapsed / 600)
pub fn decay_weight(elapsed_seconds: f64) -> f32 {
    DECAY_BASE.powf(-elapsed_seconds / DECAY_DIVISOR_SECS) as f32
}

/// Index and timing series for a single request, both `sequence_length` long
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedInput {
    indices: Vec<DenseIndex>,
    timings: Vec<f32>,
}

impl EncodedInput {
    pub fn indices(&self) -> &[DenseIndex] {
        &self.indices
    }

    pub fn timings(&self) -> &[f32] {
        &self.timings
    }

    /// Number of slots (the sequence length)
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Named `[1, N]` engine inputs: index tensor then timing tensor
    pub fn to_tensors(&self, device: &Device) -> Vec<NamedTensor> {
        vec![
            (
                tensors::INPUT_INDEX.to_string(),
                ScoringTensor::int_row(self.indices.clone(), device),
            ),
            (
                tensors::INPUT_TIMING.to_string(),
                ScoringTensor::float_row(self.timings.clone(), device),
            ),
        ]
    }
}

/// Encode newest-first events into fixed-length series
///
/// Events are reversed to oldest-first, unknown ids map to the unknown
/// sentinel, and only the newest `sequence_length` events are kept. Missing
/// slots are filled from the left with `PADDING_INDEX`, followed by one
/// `SEQUENCE_START_INDEX` right before the first real event; padded slots
/// carry a timing of 0.0.
pub fn encode(
    events: &[Event],
    sequence_length: usize,
    input_map: &IndexMap,
) -> Result<EncodedInput, EncodeError> {
    if sequence_length == 0 {
        return Err(EncodeError::InvalidSequenceLength(sequence_length));
    }

    let ignore_count = events.len().saturating_sub(sequence_length);
    let observed_count = events.len() - ignore_count;
    let padding_count = sequence_length - observed_count;

    // Oldest-first, with the oldest `ignore_count` dropped
    let retained = events.iter().rev().skip(ignore_count);

    let mut indices = Vec::with_capacity(sequence_length);
    let mut timings = Vec::with_capacity(sequence_length);

    if padding_count > 0 {
        indices.extend(iter::repeat_n(PADDING_INDEX, padding_count - 1));
        indices.push(SEQUENCE_START_INDEX);
        timings.extend(iter::repeat_n(0.0f32, padding_count));
    }

    for event in retained {
        indices.push(input_map.resolve(event.id));
        timings.push(decay_weight(event.elapsed_seconds));
    }

    if indices.len() != sequence_length || timings.len() != sequence_length {
        return Err(EncodeError::LengthMismatch {
            expected: sequence_length,
            indices: indices.len(),
            timings: timings.len(),
        });
    }

    Ok(EncodedInput { indices, timings })
}
