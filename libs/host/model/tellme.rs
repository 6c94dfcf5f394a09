//! TellMe next-command model
//!
//! Loads the index tables and sequence length from the data directory, wires
//! them to a scoring engine and answers JSON requests with the ten most likely
//! next commands.

use std::sync::Arc;

use codec::constants::TOP_K;
use codec::predictor::{DecodedOutput, PredictorConfig, SequencePredictor};
use codec::tables::ModelTables;
use codec::{Event, FixedScoringEngine, ScoringEngine};
use tracing::{debug, info, instrument};

use crate::error::ModelError;
use crate::payload::{PredictionResponse, QueryContext};

use super::{Model, ModelDirs, Score, publish_score};

/// Request scored once at load time so the first real request is not cold
pub const WARM_UP_REQUEST: &str = r#"{"CommandClickedEvents":[{"Id":1,"TimeElapsedSinceClick":0.5},{"Id":3,"TimeElapsedSinceClick":1.0},{"Id":17,"TimeElapsedSinceClick":1.5},{"Id":19,"TimeElapsedSinceClick":2.0},{"Id":21,"TimeElapsedSinceClick":2.5},{"Id":22,"TimeElapsedSinceClick":3.0},{"Id":25,"TimeElapsedSinceClick":3.5},{"Id":106,"TimeElapsedSinceClick":4.0},{"Id":108,"TimeElapsedSinceClick":4.5},{"Id":113,"TimeElapsedSinceClick":5.0},{"Id":114,"TimeElapsedSinceClick":5.5},{"Id":115,"TimeElapsedSinceClick":6.0},{"Id":120,"TimeElapsedSinceClick":6.5},{"Id":121,"TimeElapsedSinceClick":7.0},{"Id":122,"TimeElapsedSinceClick":7.5},{"Id":128,"TimeElapsedSinceClick":8.0},{"Id":129,"TimeElapsedSinceClick":8.5},{"Id":150,"TimeElapsedSinceClick":9.0},{"Id":151,"TimeElapsedSinceClick":9.5},{"Id":186,"TimeElapsedSinceClick":10.0}]}"#;

/// Command recommender driven by an injected scoring engine
pub struct TellMeModel<E: ScoringEngine> {
    dirs: ModelDirs,
    predictor: SequencePredictor<E>,
}

impl<E: ScoringEngine> TellMeModel<E> {
    /// Load tables from `dirs.data_dir` and warm the engine up
    #[instrument(level = "info", name = "tellme_load", skip_all, fields(base_dir = %dirs.base_dir.display()))]
    pub fn load(dirs: ModelDirs, engine: E) -> Result<Self, ModelError> {
        let tables = Arc::new(ModelTables::load_dir(&dirs.data_dir)?);
        Self::from_tables(dirs, tables, engine)
    }

    /// Build from tables already in memory
    pub fn from_tables(
        dirs: ModelDirs,
        tables: Arc<ModelTables>,
        engine: E,
    ) -> Result<Self, ModelError> {
        let predictor = SequencePredictor::new(tables, engine, PredictorConfig::default())?;
        let model = Self { dirs, predictor };

        let warm_up = model.predict(WARM_UP_REQUEST)?;
        debug!(response = %warm_up, "Warm-up prediction");
        info!(
            sequence_length = model.predictor.tables().sequence_length,
            "TellMe model ready"
        );

        Ok(model)
    }

    /// Score already-parsed events
    pub fn predict_events(&self, events: &[Event]) -> Result<DecodedOutput, ModelError> {
        Ok(self.predictor.predict(events)?)
    }

    pub fn dirs(&self) -> &ModelDirs {
        &self.dirs
    }

    pub fn tables(&self) -> &ModelTables {
        self.predictor.tables()
    }
}

impl TellMeModel<FixedScoringEngine> {
    /// Load with the fixed-ranking engine, for running without a real engine
    pub fn load_local(dirs: ModelDirs) -> Result<Self, ModelError> {
        let tables = Arc::new(ModelTables::load_dir(&dirs.data_dir)?);
        let engine = FixedScoringEngine::uniform(&tables.output_map, TOP_K)
            .with_sequence_length(tables.sequence_length);
        Self::from_tables(dirs, tables, engine)
    }
}

impl<E: ScoringEngine> Model for TellMeModel<E> {
    fn predict(&self, data: &str) -> Result<String, ModelError> {
        let events = QueryContext::parse(data)?.events();
        let output = self.predict_events(&events)?;
        serde_json::to_string(&PredictionResponse::from(&output)).map_err(ModelError::Response)
    }

    fn eval(&self) -> Result<Score, ModelError> {
        let score = Score::default();
        publish_score(&self.dirs, score)?;
        Ok(score)
    }
}
