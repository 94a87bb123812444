use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::batch::DEFAULT_WORKERS;
use crate::errors::GenerationError;

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Directory where the CSV tables are written.
    pub out_dir: PathBuf,
    pub cities: usize,
    pub shows: usize,
    pub tickets: usize,
    /// Zero disables the viewer table and ticket viewer references.
    pub viewers: usize,
    /// Worker threads used for ticket batches.
    pub threads: usize,
    /// Emit `_t1`/`_t2` tables with a smaller, later second pass.
    pub second_batch: bool,
    /// Draws per city name before falling back to a numeric suffix.
    pub max_unique_attempts: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("output"),
            cities: 100,
            shows: 100,
            tickets: 1000,
            viewers: 100,
            threads: DEFAULT_WORKERS,
            second_batch: false,
            max_unique_attempts: 50,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.threads == 0 {
            return Err(GenerationError::InvalidOptions(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.max_unique_attempts == 0 {
            return Err(GenerationError::InvalidOptions(
                "max_unique_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of a written table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub file: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub bytes_written: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub tables: Vec<TableReport>,
    /// City names that needed a numeric suffix to stay unique.
    pub fallback_count: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            tables: Vec::new(),
            fallback_count: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, table: TableReport) {
        self.bytes_written = self.bytes_written.saturating_add(table.bytes_written);
        self.tables.push(table);
    }

    pub fn record_fallbacks(&mut self, count: u64) {
        self.fallback_count += count;
    }

    /// Rows generated for `table` across every file it was written to.
    pub fn rows_generated(&self, table: &str) -> u64 {
        self.tables
            .iter()
            .filter(|report| report.table == table)
            .map(|report| report.rows_generated)
            .sum()
    }

    pub fn file(&self, file: &str) -> Option<&TableReport> {
        self.tables.iter().find(|report| report.file == file)
    }

    /// Write the report as pretty-printed JSON, replacing any existing file.
    pub fn write_json(&self, path: &Path) -> Result<(), GenerationError> {
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
