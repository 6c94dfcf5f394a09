use std::sync::{Arc, Mutex};

use codec::constants::tensors;
use codec::engine::{EngineError, NamedTensor, ScoringEngine, ScoringTensor};
use codec::predictor::{PredictorConfig, PredictorError, SequencePredictor};
use codec::ranking::{DecodeError, decode};
use codec::sequence::decay_weight;
use codec::tables::{IndexMap, ModelTables, ReverseIndexMap};
use codec::{Event, FixedScoringEngine};

/// Keeps the last inputs an engine received
#[derive(Default)]
struct Recorder {
    indices: Mutex<Vec<i64>>,
    timings: Mutex<Vec<f32>>,
}

/// Engine that records its inputs and answers with a fixed ranking
struct RecordingEngine {
    recorder: Recorder,
    inner: FixedScoringEngine,
}

impl ScoringEngine for RecordingEngine {
    fn run(
        &self,
        inputs: Vec<NamedTensor>,
        output_names: &[&str],
    ) -> Result<Vec<ScoringTensor>, EngineError> {
        for (name, tensor) in &inputs {
            match name.as_str() {
                tensors::INPUT_INDEX => {
                    *self.recorder.indices.lock().unwrap() =
                        tensor.clone().into_int_vec(name)?;
                }
                tensors::INPUT_TIMING => {
                    *self.recorder.timings.lock().unwrap() =
                        tensor.clone().into_float_vec(name)?;
                }
                _ => {}
            }
        }
        self.inner.run(inputs, output_names)
    }
}

struct FailingEngine;

impl ScoringEngine for FailingEngine {
    fn run(
        &self,
        _inputs: Vec<NamedTensor>,
        _output_names: &[&str],
    ) -> Result<Vec<ScoringTensor>, EngineError> {
        Err(EngineError::Scoring("model not loaded".to_string()))
    }
}

fn tables(sequence_length: usize) -> Arc<ModelTables> {
    let input_map = IndexMap::from_entries([(1, 3), (3, 4), (17, 5)]);
    let output_map = ReverseIndexMap::from_entries((0..12).map(|i| (i, 100 + i)));
    Arc::new(ModelTables::new(sequence_length, input_map, output_map).unwrap())
}

fn ranked_engine() -> FixedScoringEngine {
    let indices: Vec<i64> = (0..12).rev().collect();
    let probabilities: Vec<f32> = (0..12).map(|i| 0.2 - i as f32 * 0.01).collect();
    FixedScoringEngine::new(indices, probabilities)
}

#[test]
fn test_end_to_end_single_click() {
    let engine = RecordingEngine {
        recorder: Recorder::default(),
        inner: ranked_engine().with_sequence_length(20),
    };
    let predictor = SequencePredictor::with_defaults(tables(20), engine);

    let output = predictor.predict(&[Event::new(1, 0.5)]).unwrap();

    let indices = predictor.engine().recorder.indices.lock().unwrap().clone();
    let timings = predictor.engine().recorder.timings.lock().unwrap().clone();
    assert_eq!(indices.len(), 20);
    assert!(indices[..18].iter().all(|&i| i == 0));
    assert_eq!(indices[18], 1);
    assert_eq!(indices[19], 3);
    assert_eq!(timings[19], decay_weight(0.5));
    assert!(timings[..19].iter().all(|&t| t == 0.0));

    assert_eq!(output.predictions.len(), 10);
    assert_eq!(output.commands()[0], 111);
    assert_eq!(output.commands()[9], 102);
    assert_eq!(output.probabilities()[0], 0.2);
}

#[test]
fn test_custom_top_k() {
    let predictor = SequencePredictor::new(
        tables(4),
        ranked_engine(),
        PredictorConfig::with_top_k(3),
    )
    .unwrap();

    let output = predictor.predict(&[]).unwrap();
    assert_eq!(output.commands(), vec![111, 110, 109]);
}

#[test]
fn test_invalid_config_rejected() {
    let result = SequencePredictor::new(tables(4), ranked_engine(), PredictorConfig::with_top_k(0));
    assert!(matches!(result, Err(PredictorError::InvalidConfig(_))));
}

#[test]
fn test_too_few_ranked_entries() {
    let engine = FixedScoringEngine::new(vec![0, 1, 2], vec![0.5, 0.3, 0.2]);
    let predictor = SequencePredictor::with_defaults(tables(4), engine);

    let result = predictor.predict(&[Event::new(3, 1.0)]);
    assert!(matches!(
        result,
        Err(PredictorError::Decode(DecodeError::OutOfRange { required: 10, indices: 3, .. }))
    ));
}

#[test]
fn test_unmapped_output_index_is_surfaced() {
    let mut indices: Vec<i64> = (0..10).collect();
    indices[4] = 500;
    let engine = FixedScoringEngine::new(indices, vec![0.1; 10]);
    let predictor = SequencePredictor::with_defaults(tables(4), engine);

    let result = predictor.predict(&[]);
    assert_eq!(
        result.unwrap_err(),
        PredictorError::Decode(DecodeError::Lookup(500))
    );
}

#[test]
fn test_engine_failure_is_surfaced() {
    let predictor = SequencePredictor::with_defaults(tables(4), FailingEngine);
    assert!(matches!(
        predictor.predict(&[]),
        Err(PredictorError::Engine(EngineError::Scoring(_)))
    ));
}

#[test]
fn test_reverse_table_round_trip() {
    let output_map = ReverseIndexMap::parse("outputIndex.txt", "0\t100\n1\t200\n").unwrap();
    let ranked = decode(&[0, 1], &[0.6, 0.4], &output_map, 2).unwrap();
    assert_eq!(ranked[0].command, 100);
    assert_eq!(ranked[1].command, 200);
}

#[test]
fn test_decode_requires_k_entries() {
    let output_map = ReverseIndexMap::from_entries([(0, 100)]);
    assert!(matches!(
        decode(&[0], &[1.0], &output_map, 10),
        Err(DecodeError::OutOfRange { required: 10, indices: 1, probabilities: 1 })
    ));
    assert!(matches!(
        decode(&[0; 10], &[1.0; 9], &output_map, 10),
        Err(DecodeError::OutOfRange { probabilities: 9, .. })
    ));
}
