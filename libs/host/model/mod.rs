//! Model abstraction shared by the console harness and the hosted adapters
//!
//! A deployed model lives in a base directory with its data files under
//! `data/` and engine artifacts under `data/model/`. Evaluation results are
//! published to `.score` in the base directory.

pub mod tellme;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use codec::constants::files;
use tracing::info;

use crate::error::ModelError;

pub use tellme::TellMeModel;

/// A servable model
pub trait Model: Send + Sync {
    /// Predict from a JSON request, returning a JSON response
    fn predict(&self, data: &str) -> Result<String, ModelError>;

    /// Predict from a binary request; no model supports this
    fn predict_binary(&self, _data: &[u8]) -> Result<Vec<u8>, ModelError> {
        Err(ModelError::BinaryUnsupported)
    }

    /// Evaluate the model and publish its score
    fn eval(&self) -> Result<Score, ModelError>;
}

/// Batch precision and recall
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Score {
    pub precision: f32,
    pub recall: f32,
}

/// Directory layout of a deployed model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDirs {
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
    pub model_dir: PathBuf,
}

impl ModelDirs {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let data_dir = base_dir.join(files::DATA_DIR);
        let model_dir = data_dir.join(files::MODEL_DIR);
        Self {
            base_dir,
            data_dir,
            model_dir,
        }
    }

    /// Layout rooted at the running executable's directory
    pub fn from_executable() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let base_dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::new(base_dir))
    }

    pub fn score_file(&self) -> PathBuf {
        self.base_dir.join(files::SCORE)
    }
}

/// Write `precision: P` and `recall: R` to the score file, replacing it
pub fn publish_score(dirs: &ModelDirs, score: Score) -> Result<PathBuf, ModelError> {
    let path = dirs.score_file();
    let contents = format!(
        "precision: {}\nrecall: {}\n",
        score.precision, score.recall
    );
    fs::write(&path, contents).map_err(|e| ModelError::io(&path, e))?;

    info!(
        precision = score.precision,
        recall = score.recall,
        path = %path.display(),
        "Published score"
    );
    Ok(path)
}
