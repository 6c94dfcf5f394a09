//! Error types for table and configuration loading

use std::path::PathBuf;

use thiserror::Error;

/// Error types for loading index tables and the sequence length file
#[derive(Debug, Error)]
pub enum TableError {
    /// File could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table row is not two tab-separated integers
    #[error("Malformed table {table} at line {line}: {reason}")]
    MalformedTable {
        table: String,
        line: usize,
        reason: String,
    },

    /// The sequence length file is not a single positive integer
    #[error("Malformed config {}: {reason}", path.display())]
    MalformedConfig { path: PathBuf, reason: String },

    /// Tables assembled in memory break a table invariant
    #[error("Invalid model tables: {0}")]
    InvalidTables(String),
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed_table(table: &str, line: usize, reason: impl Into<String>) -> Self {
        TableError::MalformedTable {
            table: table.to_string(),
            line,
            reason: reason.into(),
        }
    }
}
