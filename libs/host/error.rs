//! Error types for the hosting layer

use std::path::PathBuf;

use codec::predictor::PredictorError;
use codec::tables::TableError;
use thiserror::Error;

/// Errors surfaced to whoever drives a model
#[derive(Debug, Error)]
pub enum ModelError {
    /// Configuration files could not be loaded; the model must not serve
    #[error("Model initialization failed: {0}")]
    Tables(#[from] TableError),

    #[error("Prediction failed: {0}")]
    Predict(#[from] PredictorError),

    #[error("Malformed request payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Failed to serialize response: {0}")]
    Response(#[source] serde_json::Error),

    /// Binary requests are a permanent, declared limitation
    #[error("Binary payloads are not supported")]
    BinaryUnsupported,

    #[error("Model is not initialized")]
    NotInitialized,

    #[error("Request {trace_id} was cancelled")]
    Cancelled { trace_id: String },

    #[error("Malformed prediction case at line {line}: {reason}")]
    MalformedCase { line: usize, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ModelError::Io {
            path: path.into(),
            source,
        }
    }
}
