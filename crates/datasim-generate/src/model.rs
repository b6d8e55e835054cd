use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options for the dataset generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Rows between two progress events when the schema enables logging.
    pub progress_interval: usize,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            progress_interval: 1000,
            overwrite: true,
        }
    }
}

/// Summary of a dataset written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub path: PathBuf,
    pub format: String,
    pub rows_requested: usize,
    pub rows_written: usize,
    pub bytes_written: u64,
    pub seed: Option<u64>,
    pub duration_ms: u64,
}
