use crate::types::{MetricName, TractId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown tract: {tract_id}")]
    UnknownTract { tract_id: TractId },

    #[error("Unknown metric '{metric}'")]
    UnknownMetric { metric: MetricName },

    #[error("Duplicate tract {tract_id} in table '{table}'")]
    DuplicateTract { table: String, tract_id: TractId },

    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("Non-numeric value '{value}' in metric column '{column}' for tract {tract_id}")]
    InvalidMetricValue {
        column:   String,
        tract_id: TractId,
        value:    String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
