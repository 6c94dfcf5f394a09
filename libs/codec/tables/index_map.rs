//! Bidirectional command lookup tables
//!
//! Both tables are two-column tab-separated text files with one mapping per
//! row. The input table is keyed by its first column (external command id),
//! the output table by its first column as well, but there that column holds
//! the dense output index. The two files are authored independently, so the
//! column meaning differs even though the parsing is the same.
//!
//! On disk:
//!
//! - `inputIndex.txt`: `command_id<TAB>dense_index`
//! - `outputIndex.txt`: `dense_index<TAB>command_id`
//!
//! Output tables exported with the command id in the first column must be
//! swapped before deployment; loading one as-is decodes every prediction to
//! the wrong command, or fails with a lookup error.
//!
//! Dense indices 0, 1 and 2 are reserved for padding, the sequence start and
//! unknown commands, so the input table may not map a command onto them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::constants::{UNKNOWN_INDEX, is_sentinel};
use crate::{CommandId, DenseIndex};

use super::error::TableError;

/// External command id -> dense input index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexMap {
    entries: HashMap<CommandId, DenseIndex>,
}

impl IndexMap {
    /// Build a table from (command id, dense index) pairs, last write wins
    pub fn from_entries(entries: impl IntoIterator<Item = (CommandId, DenseIndex)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse `command_id<TAB>dense_index` rows
    ///
    /// A row mapping a command onto a reserved sentinel index is malformed.
    pub fn parse(table: &str, text: &str) -> Result<Self, TableError> {
        let rows = parse_rows(table, text)?;
        if let Some((i, (id, index))) = rows
            .iter()
            .enumerate()
            .find(|(_, (_, index))| is_sentinel(*index))
        {
            return Err(TableError::malformed_table(
                table,
                i + 1,
                format!("command {} mapped to reserved index {}", id, index),
            ));
        }
        Ok(Self::from_entries(rows))
    }

    /// Load and parse a table file
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let text = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
        let map = Self::parse(&table_name(path), &text)?;
        debug!(path = %path.display(), entries = map.len(), "Loaded input index table");
        Ok(map)
    }

    /// Dense index for a command, or the unknown sentinel
    pub fn resolve(&self, id: CommandId) -> DenseIndex {
        self.get(id).unwrap_or(UNKNOWN_INDEX)
    }

    /// Dense index for a command, if the table knows it
    pub fn get(&self, id: CommandId) -> Option<DenseIndex> {
        self.entries.get(&id).copied()
    }

    /// First entry whose dense index is a reserved sentinel
    pub fn sentinel_entry(&self) -> Option<(CommandId, DenseIndex)> {
        self.entries
            .iter()
            .map(|(&id, &index)| (id, index))
            .find(|&(_, index)| is_sentinel(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dense output index -> external command id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseIndexMap {
    entries: HashMap<DenseIndex, CommandId>,
}

impl ReverseIndexMap {
    /// Build a table from (dense index, command id) pairs, last write wins
    pub fn from_entries(entries: impl IntoIterator<Item = (DenseIndex, CommandId)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse `dense_index<TAB>command_id` rows
    pub fn parse(table: &str, text: &str) -> Result<Self, TableError> {
        Ok(Self::from_entries(parse_rows(table, text)?))
    }

    /// Load and parse a table file
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let text = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
        let map = Self::parse(&table_name(path), &text)?;
        debug!(path = %path.display(), entries = map.len(), "Loaded output index table");
        Ok(map)
    }

    /// Command id for a dense output index
    pub fn lookup(&self, index: DenseIndex) -> Option<CommandId> {
        self.entries.get(&index).copied()
    }

    /// All dense indices in ascending order
    pub fn sorted_indices(&self) -> Vec<DenseIndex> {
        let mut indices: Vec<DenseIndex> = self.entries.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn table_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Split every line into exactly two integer fields
fn parse_rows(table: &str, text: &str) -> Result<Vec<(i64, i64)>, TableError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| -> Result<(i64, i64), TableError> {
            let line_no = i + 1;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 2 {
                return Err(TableError::malformed_table(
                    table,
                    line_no,
                    format!("expected 2 tab-delimited columns, found {}", fields.len()),
                ));
            }
            let key = parse_field(table, line_no, fields[0])?;
            let value = parse_field(table, line_no, fields[1])?;
            Ok((key, value))
        })
        .collect()
}

fn parse_field(table: &str, line: usize, field: &str) -> Result<i64, TableError> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|e| TableError::malformed_table(table, line, format!("{:?}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_table_resolves_with_fallback() {
        let map = IndexMap::parse("inputIndex.txt", "100\t3\n200\t4\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve(100), 3);
        assert_eq!(map.resolve(200), 4);
        assert_eq!(map.resolve(999), UNKNOWN_INDEX);
        assert_eq!(map.get(999), None);
    }

    #[test]
    fn test_output_table_keyed_by_first_column() {
        let map = ReverseIndexMap::parse("outputIndex.txt", "0\t100\n1\t200").unwrap();
        assert_eq!(map.lookup(0), Some(100));
        assert_eq!(map.lookup(1), Some(200));
        assert_eq!(map.lookup(2), None);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let map = IndexMap::parse("inputIndex.txt", "7\t3\n7\t9\n").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve(7), 9);
    }

    #[test]
    fn test_crlf_and_padded_fields() {
        let map = IndexMap::parse("inputIndex.txt", "5\t 6\r\n8 \t9\r\n").unwrap();
        assert_eq!(map.resolve(5), 6);
        assert_eq!(map.resolve(8), 9);
    }

    #[test]
    fn test_wrong_column_count_is_malformed() {
        let err = IndexMap::parse("inputIndex.txt", "1\t3\n3\t4\t5\n").unwrap_err();
        match err {
            TableError::MalformedTable { table, line, .. } => {
                assert_eq!(table, "inputIndex.txt");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(ReverseIndexMap::parse("outputIndex.txt", "1 2\n").is_err());
        assert!(IndexMap::parse("inputIndex.txt", "1\t3\n\n3\t4\n").is_err());
    }

    #[test]
    fn test_reserved_input_index_is_malformed() {
        for (text, line) in [("5\t1\n", 1), ("5\t3\n6\t0\n", 2), ("5\t3\n6\t4\n7\t2\n", 3)] {
            let err = IndexMap::parse("inputIndex.txt", text).unwrap_err();
            assert!(
                matches!(err, TableError::MalformedTable { line: l, .. } if l == line),
                "{:?} -> {}",
                text,
                err
            );
        }

        let map = ReverseIndexMap::parse("outputIndex.txt", "0\t100\n1\t200\n2\t300\n").unwrap();
        assert_eq!(map.lookup(1), Some(200));
    }

    #[test]
    fn test_sentinel_entry() {
        assert_eq!(IndexMap::from_entries([(5, 3)]).sentinel_entry(), None);
        assert_eq!(IndexMap::from_entries([(5, 3), (6, 1)]).sentinel_entry(), Some((6, 1)));
    }

    #[test]
    fn test_non_integer_field_is_malformed() {
        let err = IndexMap::parse("inputIndex.txt", "abc\t2\n").unwrap_err();
        assert!(matches!(err, TableError::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn test_sorted_indices() {
        let map = ReverseIndexMap::from_entries([(5, 50), (1, 10), (3, 30)]);
        assert_eq!(map.sorted_indices(), vec![1, 3, 5]);
    }
}
