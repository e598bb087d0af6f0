use serde::Serialize;
use thiserror::Error;

/// Failure to turn one input into a stored record.
///
/// Always attributable to the id of the input that caused it, so batch
/// callers can report failures per item.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("failed to index record {record_id}: {message}")]
pub struct IndexerError {
    pub record_id: String,
    pub message: String,
}

impl IndexerError {
    pub fn new(record_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            message: message.into(),
        }
    }

    /// Wraps any failure raised while processing `record_id`.
    pub fn wrap<E: std::fmt::Display>(record_id: &str, err: E) -> Self {
        Self::new(record_id, err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RetrieverError {
    #[error("invalid retrieval query: {0}")]
    InvalidQuery(String),

    #[error("failed to embed query: {0}")]
    Embedding(#[source] anyhow::Error),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("embedding for record {id} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
