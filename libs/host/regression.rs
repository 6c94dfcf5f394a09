//! Prediction regression checks
//!
//! A `predictions.txt` file holds one case per line: a request, a tab, and the
//! response recorded for it. A case passes when the model's current
//! `ProbabilityList` equals the recorded one exactly. Command ids and timing
//! are not compared.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ModelError;
use crate::model::Model;

/// One recorded request/response pair
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionCase {
    /// 1-based line in the source file
    pub line: usize,
    pub input: String,
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseFailure {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegressionReport {
    pub total: usize,
    pub failures: Vec<CaseFailure>,
}

impl RegressionReport {
    pub fn passed(&self) -> usize {
        self.total - self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Probabilities {
    probability_list: Vec<f64>,
}

/// Parse `input<TAB>expected` lines, skipping blank ones
pub fn parse_cases(text: &str) -> Result<Vec<PredictionCase>, ModelError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| -> Result<PredictionCase, ModelError> {
            let (input, expected) =
                line.split_once('\t')
                    .ok_or_else(|| ModelError::MalformedCase {
                        line: i + 1,
                        reason: "expected input and expected output separated by a tab"
                            .to_string(),
                    })?;
            Ok(PredictionCase {
                line: i + 1,
                input: input.to_string(),
                expected: expected.to_string(),
            })
        })
        .collect()
}

pub fn load_cases(path: &Path) -> Result<Vec<PredictionCase>, ModelError> {
    let text = fs::read_to_string(path).map_err(|e| ModelError::io(path, e))?;
    parse_cases(&text)
}

/// Run every case through the model and collect mismatches
pub fn check_predictions<M: Model + ?Sized>(model: &M, cases: &[PredictionCase]) -> RegressionReport {
    let failures: Vec<CaseFailure> = cases
        .iter()
        .filter_map(|case| {
            check_case(model, case)
                .err()
                .map(|reason| CaseFailure {
                    line: case.line,
                    reason,
                })
        })
        .collect();

    for failure in &failures {
        warn!(line = failure.line, reason = %failure.reason, "Prediction case failed");
    }

    let report = RegressionReport {
        total: cases.len(),
        failures,
    };
    info!(
        total = report.total,
        passed = report.passed(),
        "Prediction check finished"
    );
    report
}

fn check_case<M: Model + ?Sized>(model: &M, case: &PredictionCase) -> Result<(), String> {
    let expected: Probabilities = serde_json::from_str(&case.expected)
        .map_err(|e| format!("unreadable expected output: {e}"))?;
    let predicted = model.predict(&case.input).map_err(|e| e.to_string())?;
    let predicted: Probabilities = serde_json::from_str(&predicted)
        .map_err(|e| format!("unreadable prediction: {e}"))?;

    if expected.probability_list != predicted.probability_list {
        return Err(format!(
            "expected {:?}, got {:?}",
            expected.probability_list, predicted.probability_list
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Score;

    /// Echoes a fixed probability list regardless of input
    struct EchoModel(&'static str);

    impl Model for EchoModel {
        fn predict(&self, data: &str) -> Result<String, ModelError> {
            if data == "fail" {
                return Err(ModelError::BinaryUnsupported);
            }
            Ok(self.0.to_string())
        }

        fn eval(&self) -> Result<Score, ModelError> {
            Ok(Score::default())
        }
    }

    #[test]
    fn test_parse_cases() {
        let text = "{}\t{\"ProbabilityList\":[0.5]}\n\n{\"CommandClickedEvents\":[]}\t{\"ProbabilityList\":[]}\n";
        let cases = parse_cases(text).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].line, 1);
        assert_eq!(cases[1].line, 3);
        assert_eq!(cases[1].input, "{\"CommandClickedEvents\":[]}");
    }

    #[test]
    fn test_missing_tab_is_malformed() {
        let result = parse_cases("just-an-input\n");
        assert!(matches!(result, Err(ModelError::MalformedCase { line: 1, .. })));
    }

    #[test]
    fn test_check_reports_mismatches() {
        let model = EchoModel(r#"{"CommandList":[1],"ProbabilityList":[0.5],"SecondsElapsed":0.1}"#);
        let cases = parse_cases(concat!(
            "a\t{\"ProbabilityList\":[0.5],\"CommandList\":[7]}\n",
            "b\t{\"ProbabilityList\":[0.25]}\n",
            "fail\t{\"ProbabilityList\":[0.5]}\n",
        ))
        .unwrap();

        let report = check_predictions(&model, &cases);
        assert_eq!(report.total, 3);
        assert_eq!(report.passed(), 1);
        assert!(!report.is_success());
        let lines: Vec<usize> = report.failures.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }
}
