//! Error types for the RAGOps evaluation core.
//!
//! Uses `thiserror` for public API error types. Every variant is fatal for a
//! run: the report either reflects the whole run or is not written at all.

use std::path::PathBuf;

/// Top-level error type for the RAGOps core library.
#[derive(Debug, thiserror::Error)]
pub enum RagOpsError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed or unusable evaluation data.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Corpus is empty")]
    EmptyCorpus,

    #[error("Question set is empty")]
    EmptyQuestions,

    #[error("No records to evaluate")]
    EmptyRecords,

    #[error("{kind} '{id}' is missing required field '{field}'")]
    MissingField {
        kind: &'static str,
        id: String,
        field: &'static str,
    },

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Retrieval width must be at least 1")]
    ZeroWidth,

    #[error("Corpus has {documents} documents but retrieval width is {width}")]
    CorpusTooSmall { documents: usize, width: usize },

    #[error("Record {index} has {actual} retrieved contexts, expected {expected}")]
    WidthMismatch {
        index: usize,
        actual: usize,
        expected: usize,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Errors from configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// Convenience type alias for RAGOps results.
pub type Result<T> = std::result::Result<T, RagOpsError>;
