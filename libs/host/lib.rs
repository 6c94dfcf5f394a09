//! Hosting layer for the TellMe command recommender
//!
//! This crate is a thin shell around the `codec` library. It owns the request
//! and response payloads, the model abstraction that the console harness and
//! hosted adapters drive, and local stand-ins for the hosting runtime's
//! context objects. All encoding, scoring and decoding is delegated to `codec`.

pub mod context;
pub mod error;
pub mod inference;
pub mod model;
pub mod payload;
pub mod regression;

pub use error::ModelError;
pub use model::{Model, ModelDirs, Score, TellMeModel};
pub use payload::{CommandInfo, PredictionResponse, QueryContext};
