//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, StoreError};

/// Map domain errors to a string for CLI output, with a hint where one helps.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Store(StoreError::Io(_)) => format!(
            "{}\nHint: pass --snapshot or set store.snapshot_path in config/config.toml",
            e
        ),
        _ => e.to_string(),
    }
}
