//! Sequence predictor module
//!
//! Runs one full request: encode the click history, score it with the
//! injected engine, decode the top-K commands. The tables are shared and
//! read-only, so one predictor can serve any number of callers as long as
//! the engine itself tolerates concurrent use.

pub mod config;
pub mod error;
pub mod predictor;

pub use config::PredictorConfig;
pub use error::PredictorError;
pub use predictor::{DecodedOutput, SequencePredictor};
