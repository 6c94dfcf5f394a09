use std::fs;

use host::model::ModelDirs;
use tempfile::TempDir;

pub const SEQUENCE_LENGTH: usize = 20;

/// Base directory with a deployable data/ layout
///
/// Input table maps command 1 -> 3, 3 -> 4, 17 -> 5. Output table maps dense
/// indices 0..15 to commands 1000..1015.
pub fn model_dir() -> (TempDir, ModelDirs) {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = ModelDirs::new(tmp.path());
    fs::create_dir_all(&dirs.model_dir).unwrap();

    fs::write(
        dirs.data_dir.join("sequenceLength.txt"),
        format!("{}\n", SEQUENCE_LENGTH),
    )
    .unwrap();
    fs::write(dirs.data_dir.join("inputIndex.txt"), "1\t3\n3\t4\n17\t5\n").unwrap();

    let output: String = (0..15).map(|i| format!("{}\t{}\n", i, 1000 + i)).collect();
    fs::write(dirs.data_dir.join("outputIndex.txt"), output).unwrap();

    (tmp, dirs)
}
