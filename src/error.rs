//! Error types for the prompt compilation engine.
//!
//! Resolution, draft application, compilation, token estimation and
//! fingerprinting are total and never fail. Errors only surface at the
//! edges: building or loading a block store, parsing drafts, and loading
//! configuration.

use crate::block::BlockScope;
use std::path::PathBuf;
use thiserror::Error;

/// Block store construction and loading errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate block id '{id}' (in {first} and {second})")]
    DuplicateBlockId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Block '{id}' has scope {actual} but belongs to a {expected} collection")]
    ScopeMismatch {
        id: String,
        expected: BlockScope,
        actual: BlockScope,
    },

    #[error("Failed to parse block snapshot {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid draft for block '{block_id}': {message}")]
    InvalidDraft { block_id: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Output(err.to_string())
    }
}
