//! Error types for loading match data and training the predictor.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a predictor.
///
/// Row-level problems in the dataset are not errors; they are filtered out
/// by the loader. Only structural failures end up here.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("Failed to read match data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed match data: {0}")]
    Csv(#[from] csv::Error),

    #[error("No valid match rows to train on")]
    InsufficientData,
}

pub type Result<T> = std::result::Result<T, PredictorError>;
