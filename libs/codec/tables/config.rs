//! Data file locations and the loaded model tables

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::constants::files;

use super::error::TableError;
use super::index_map::{IndexMap, ReverseIndexMap};

/// Paths of the three configuration files inside a data directory
#[derive(Debug, Clone, PartialEq)]
pub struct DataFiles {
    pub sequence_length: PathBuf,
    pub input_index: PathBuf,
    pub output_index: PathBuf,
}

impl DataFiles {
    /// Standard file names inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            sequence_length: data_dir.join(files::SEQUENCE_LENGTH),
            input_index: data_dir.join(files::INPUT_INDEX),
            output_index: data_dir.join(files::OUTPUT_INDEX),
        }
    }
}

/// Read a single-line file holding a positive integer
pub fn read_sequence_length(path: &Path) -> Result<usize, TableError> {
    let text = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    let first_line = text.lines().next().unwrap_or("").trim();

    let value = first_line
        .parse::<usize>()
        .map_err(|e| TableError::MalformedConfig {
            path: path.to_path_buf(),
            reason: format!("{:?}: {}", first_line, e),
        })?;

    if value == 0 {
        return Err(TableError::MalformedConfig {
            path: path.to_path_buf(),
            reason: "sequence length must be > 0".to_string(),
        });
    }

    Ok(value)
}

/// Lookup tables and sequence length, loaded once per process
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTables {
    /// Number of slots in every encoded sequence (> 0)
    pub sequence_length: usize,

    /// External command id -> dense input index
    pub input_map: IndexMap,

    /// Dense output index -> external command id
    pub output_map: ReverseIndexMap,
}

impl ModelTables {
    /// Assemble tables built elsewhere (tests, synthetic tables)
    pub fn new(
        sequence_length: usize,
        input_map: IndexMap,
        output_map: ReverseIndexMap,
    ) -> Result<Self, TableError> {
        if sequence_length == 0 {
            return Err(TableError::InvalidTables(
                "sequence length must be > 0".to_string(),
            ));
        }

        if let Some((id, index)) = input_map.sentinel_entry() {
            return Err(TableError::InvalidTables(format!(
                "command {} mapped to reserved index {}",
                id, index
            )));
        }

        Ok(Self {
            sequence_length,
            input_map,
            output_map,
        })
    }

    /// Load all three files; any failure is fatal for serving
    #[instrument(level = "info", name = "model_tables_load", skip_all)]
    pub fn load(files: &DataFiles) -> Result<Self, TableError> {
        let sequence_length = read_sequence_length(&files.sequence_length)?;
        let input_map = IndexMap::load(&files.input_index)?;
        let output_map = ReverseIndexMap::load(&files.output_index)?;

        info!(
            sequence_length,
            input_entries = input_map.len(),
            output_entries = output_map.len(),
            "Model tables loaded"
        );

        Ok(Self {
            sequence_length,
            input_map,
            output_map,
        })
    }

    /// Load from the standard file names inside `data_dir`
    pub fn load_dir(data_dir: &Path) -> Result<Self, TableError> {
        Self::load(&DataFiles::in_dir(data_dir))
    }
}
