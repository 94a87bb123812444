use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("no parent rows to reference from table '{table}'")]
    NoParentRows { table: String },
    #[error("empty date window: start {start} is not before end {end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("thread pool error: {0}")]
    ThreadPool(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
