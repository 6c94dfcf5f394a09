use crate::constants::{MODEL_NAME, TOP_K};

use super::error::PredictorError;

/// Configuration for the sequence predictor
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorConfig {
    /// Number of ranked commands decoded per request
    pub top_k: usize,

    /// Model name the engine was initialised with
    pub model_name: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            top_k: TOP_K,
            model_name: MODEL_NAME.to_string(),
        }
    }
}

impl PredictorConfig {
    /// Default configuration with a custom top-K
    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            top_k,
            ..Self::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.top_k == 0 {
            return Err(PredictorError::InvalidConfig(
                "top_k must be > 0".to_string(),
            ));
        }

        if self.model_name.is_empty() {
            return Err(PredictorError::InvalidConfig(
                "model_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
