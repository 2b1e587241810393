//! Config loading facade: assembles sources in precedence order.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::PromptcConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`PromptcConfig`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{PROMPTC_ENV}.toml`,
    /// `PROMPTC__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<PromptcConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config: PromptcConfig = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from a single file plus environment overrides
    pub fn load_from_file(path: &Path) -> Result<PromptcConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config: PromptcConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}
