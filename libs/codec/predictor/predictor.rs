use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::constants::tensors;
use crate::engine::{Device, EngineError, ScoringEngine};
use crate::ranking::{RankedCommand, decode_tensors};
use crate::sequence::encode;
use crate::tables::ModelTables;
use crate::{CommandId, Event};

use super::config::PredictorConfig;
use super::error::PredictorError;

/// Ranked commands for one request plus the round-trip time
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedOutput {
    pub predictions: Vec<RankedCommand>,

    /// Wall-clock time spent in encode -> infer -> decode
    pub elapsed: Duration,
}

impl DecodedOutput {
    pub fn commands(&self) -> Vec<CommandId> {
        self.predictions.iter().map(|p| p.command).collect()
    }

    pub fn probabilities(&self) -> Vec<f32> {
        self.predictions.iter().map(|p| p.probability).collect()
    }
}

/// Encodes click histories, scores them and decodes the top-K commands
pub struct SequencePredictor<E: ScoringEngine> {
    /// Shared read-only lookup tables
    tables: Arc<ModelTables>,

    /// Injected scoring engine
    engine: E,

    config: PredictorConfig,

    /// Device the input tensors are built on
    device: Device,
}

impl<E: ScoringEngine> SequencePredictor<E> {
    /// Create a new predictor over loaded tables
    pub fn new(
        tables: Arc<ModelTables>,
        engine: E,
        config: PredictorConfig,
    ) -> Result<Self, PredictorError> {
        config.validate()?;

        Ok(Self {
            tables,
            engine,
            config,
            device: Device::default(),
        })
    }

    /// Create a predictor with the default configuration
    pub fn with_defaults(tables: Arc<ModelTables>, engine: E) -> Self {
        Self {
            tables,
            engine,
            config: PredictorConfig::default(),
            device: Device::default(),
        }
    }

    /// Predict the top-K next commands for a newest-first click history
    #[instrument(level = "debug", skip_all, fields(events = events.len()))]
    pub fn predict(&self, events: &[Event]) -> Result<DecodedOutput, PredictorError> {
        let started = Instant::now();

        let encoded = encode(
            events,
            self.tables.sequence_length,
            &self.tables.input_map,
        )?;

        let outputs = self
            .engine
            .run(encoded.to_tensors(&self.device), &tensors::OUTPUTS)?;
        let mut outputs = outputs.into_iter();
        let (Some(index), Some(probability)) = (outputs.next(), outputs.next()) else {
            return Err(EngineError::MissingOutput(tensors::OUTPUT_PROBABILITY.to_string()).into());
        };

        let predictions = decode_tensors(
            index,
            probability,
            &self.tables.output_map,
            self.config.top_k,
        )?;

        let elapsed = started.elapsed();
        debug!(
            model = %self.config.model_name,
            elapsed_us = elapsed.as_micros() as u64,
            "Prediction complete"
        );

        Ok(DecodedOutput {
            predictions,
            elapsed,
        })
    }

    pub fn tables(&self) -> &ModelTables {
        &self.tables
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
