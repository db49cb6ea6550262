use std::path::PathBuf;

/// Lines at or below this confidence are dropped.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Clone, Debug)]
pub struct ProcessorConfig {
    pub confidence_threshold: f64,
    pub temp_dir: Option<PathBuf>, // system temp dir when unset
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            temp_dir: None,
        }
    }
}

impl ProcessorConfig {
    pub fn new(confidence_threshold: f64, temp_dir: Option<PathBuf>) -> Self {
        Self {
            confidence_threshold,
            temp_dir,
        }
    }
}
