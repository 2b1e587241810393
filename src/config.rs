//! Configuration System
//!
//! Layered configuration for the preview CLI and host applications:
//! defaults, the global config file, workspace config files and
//! `PROMPTC__`-prefixed environment variables, in increasing precedence.
//!
//! Separator, section marker, token ratio and fingerprint width are
//! engine constants, not configuration.

use crate::logging::LoggingConfig;
use crate::tokens::TokenBudget;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptcConfig {
    /// Block store snapshot location
    #[serde(default)]
    pub store: StoreConfig,

    /// Token budget shown next to estimates
    #[serde(default)]
    pub budget: BudgetConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Block store snapshot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file; relative paths resolve against the workspace root
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

pub(crate) fn default_snapshot_path() -> PathBuf {
    PathBuf::from("prompts/blocks.toml")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl StoreConfig {
    pub fn resolve_snapshot_path(&self, workspace_root: &Path) -> PathBuf {
        if self.snapshot_path.is_absolute() {
            self.snapshot_path.clone()
        } else {
            workspace_root.join(&self.snapshot_path)
        }
    }
}

/// Token budget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Ceiling that token estimates are displayed against
    #[serde(default = "default_token_ceiling")]
    pub token_ceiling: usize,
}

pub(crate) fn default_token_ceiling() -> usize {
    8192
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            token_ceiling: default_token_ceiling(),
        }
    }
}

impl BudgetConfig {
    pub fn token_budget(&self) -> TokenBudget {
        TokenBudget::new(self.token_ceiling)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Store(String),
    Budget(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
            ValidationError::Budget(msg) => write!(f, "Budget: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PromptcConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.store.snapshot_path.as_os_str().is_empty() {
            errors.push(ValidationError::Store(
                "Snapshot path cannot be empty".to_string(),
            ));
        }

        if self.budget.token_ceiling == 0 {
            errors.push(ValidationError::Budget(
                "Token ceiling must be greater than zero".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
