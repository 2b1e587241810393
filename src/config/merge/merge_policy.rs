//! Merge rules: defaults, override order, conflict handling.

use crate::config::{default_snapshot_path, default_token_ceiling};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PROMPTC";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default(
            "store.snapshot_path",
            default_snapshot_path().to_string_lossy().to_string(),
        )?
        .set_default("budget.token_ceiling", default_token_ceiling() as i64)
}

/// Environment source, applied last: `PROMPTC__BUDGET__TOKEN_CEILING=4096`.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
