use crate::DenseIndex;

// Reserved dense indices, never produced by the input table
pub const PADDING_INDEX: DenseIndex = 0;
pub const SEQUENCE_START_INDEX: DenseIndex = 1;
pub const UNKNOWN_INDEX: DenseIndex = 2;

// Recency decay: weight = DECAY_BASE ^ (-elapsed / DECAY_DIVISOR_SECS)
pub const DECAY_BASE: f64 = 10.0;
pub const DECAY_DIVISOR_SECS: f64 = 600.0;

/// Number of ranked commands returned per prediction
pub const TOP_K: usize = 10;

/// Model name registered with the scoring engine
pub const MODEL_NAME: &str = "TellMe";

/// Tensor names understood by the scoring engine
pub mod tensors {
    pub const INPUT_INDEX: &str = "input1";
    pub const INPUT_TIMING: &str = "input2";
    pub const OUTPUT_INDEX: &str = "index";
    pub const OUTPUT_PROBABILITY: &str = "probability";

    /// Output names in the order the predictor requests them
    pub const OUTPUTS: [&str; 2] = [OUTPUT_INDEX, OUTPUT_PROBABILITY];
}

/// File and directory names of a deployed model
pub mod files {
    pub const DATA_DIR: &str = "data";
    pub const MODEL_DIR: &str = "model";
    pub const SEQUENCE_LENGTH: &str = "sequenceLength.txt";
    pub const INPUT_INDEX: &str = "inputIndex.txt";
    pub const OUTPUT_INDEX: &str = "outputIndex.txt";
    pub const SCORE: &str = ".score";
}

/// Check whether a dense index is one of the reserved sentinels
pub fn is_sentinel(index: DenseIndex) -> bool {
    matches!(
        index,
        PADDING_INDEX | SEQUENCE_START_INDEX | UNKNOWN_INDEX
    )
}
