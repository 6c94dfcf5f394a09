//! Index tables and sequence length module
//!
//! Loads the small configuration artifacts a deployed model ships with:
//!
//! - index_map::IndexMap: external command id -> dense input index
//! - index_map::ReverseIndexMap: dense output index -> external command id
//! - config::ModelTables: both tables plus the sequence length, loaded once
//!
//! Everything here is immutable after loading and safe to share across threads.

pub mod config;
pub mod error;
pub mod index_map;

pub use config::{DataFiles, ModelTables, read_sequence_length};
pub use error::TableError;
pub use index_map::{IndexMap, ReverseIndexMap};
