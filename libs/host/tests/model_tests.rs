use std::fs;

use codec::FixedScoringEngine;
use host::model::{Model, TellMeModel};
use host::{ModelError, PredictionResponse};

mod common;

#[test]
fn test_load_and_predict() {
    let (_tmp, dirs) = common::model_dir();
    let model = TellMeModel::load_local(dirs).unwrap();

    assert_eq!(model.tables().sequence_length, common::SEQUENCE_LENGTH);

    let output = model
        .predict(r#"{"CommandClickedEvents":[{"Id":1,"TimeElapsedSinceClick":0.5}]}"#)
        .unwrap();
    let response: PredictionResponse = serde_json::from_str(&output).unwrap();

    assert_eq!(
        response.command_list,
        (1000..1010).collect::<Vec<i64>>()
    );
    assert_eq!(response.probability_list, vec![0.1f32; 10]);
    assert!(response.seconds_elapsed >= 0.0);
}

#[test]
fn test_empty_request_is_served() {
    let (_tmp, dirs) = common::model_dir();
    let model = TellMeModel::load_local(dirs).unwrap();

    let output = model.predict("").unwrap();
    let response: PredictionResponse = serde_json::from_str(&output).unwrap();
    assert_eq!(response.command_list.len(), 10);
    assert_eq!(response.probability_list.len(), 10);
}

#[test]
fn test_ranked_engine_order_is_kept() {
    let (_tmp, dirs) = common::model_dir();
    let indices: Vec<i64> = (0..10).rev().collect();
    let probabilities: Vec<f32> = (0..10).map(|i| 0.5 / (i + 1) as f32).collect();
    let engine = FixedScoringEngine::new(indices, probabilities.clone());

    let model = TellMeModel::load(dirs, engine).unwrap();
    let decoded = model.predict_events(&[]).unwrap();

    assert_eq!(decoded.commands()[0], 1009);
    assert_eq!(decoded.commands()[9], 1000);
    assert_eq!(decoded.probabilities(), probabilities);
}

#[test]
fn test_malformed_request_is_rejected() {
    let (_tmp, dirs) = common::model_dir();
    let model = TellMeModel::load_local(dirs).unwrap();

    assert!(matches!(
        model.predict("{\"CommandClickedEvents\":"),
        Err(ModelError::Payload(_))
    ));
}

#[test]
fn test_binary_is_unsupported() {
    let (_tmp, dirs) = common::model_dir();
    let model = TellMeModel::load_local(dirs).unwrap();

    assert!(matches!(
        model.predict_binary(&[1, 2, 3]),
        Err(ModelError::BinaryUnsupported)
    ));
}

#[test]
fn test_eval_publishes_zero_score() {
    let (_tmp, dirs) = common::model_dir();
    let model = TellMeModel::load_local(dirs.clone()).unwrap();

    let score = model.eval().unwrap();
    assert_eq!(score.precision, 0.0);
    assert_eq!(score.recall, 0.0);
    assert_eq!(
        fs::read_to_string(dirs.score_file()).unwrap(),
        "precision: 0\nrecall: 0\n"
    );
}

#[test]
fn test_malformed_table_fails_load() {
    let (_tmp, dirs) = common::model_dir();
    fs::write(dirs.data_dir.join("inputIndex.txt"), "1\t3\t9\n").unwrap();

    assert!(matches!(
        TellMeModel::load_local(dirs),
        Err(ModelError::Tables(_))
    ));
}

#[test]
fn test_small_output_table_fails_warm_up() {
    let (_tmp, dirs) = common::model_dir();
    fs::write(dirs.data_dir.join("outputIndex.txt"), "0\t1000\n1\t1001\n").unwrap();

    assert!(matches!(
        TellMeModel::load_local(dirs),
        Err(ModelError::Predict(_))
    ));
}
