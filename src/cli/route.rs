//! CLI route: single route table and run context. Dispatches to the engine and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_blocks_json, format_blocks_table, format_compiled_json, format_compiled_text,
    format_draft_status_json, format_draft_status_text,
};
use crate::config::{ConfigLoader, PromptcConfig};
use crate::draft::DraftOverlay;
use crate::engine::{CompileTarget, PromptEngine};
use crate::error::ApiError;
use crate::store::{load_snapshot, InMemoryBlockStore};
use crate::tokens::TokenBudget;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded config and block store snapshot.
pub struct RunContext {
    store: InMemoryBlockStore,
    budget: TokenBudget,
    snapshot_path: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root, optional config path and optional snapshot override.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        snapshot_override: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = load_config(&workspace_root, config_path.as_deref())?;

        let snapshot_path = snapshot_override
            .unwrap_or_else(|| config.store.resolve_snapshot_path(&workspace_root));
        let store = load_snapshot(&snapshot_path)?;
        info!(snapshot = %snapshot_path.display(), blocks = store.len(), "Block snapshot loaded");

        Ok(Self {
            store,
            budget: config.budget.token_budget(),
            snapshot_path,
        })
    }

    /// Context over an already-built store (hosts and tests)
    pub fn from_store(store: InMemoryBlockStore, budget: TokenBudget) -> Self {
        Self {
            store,
            budget,
            snapshot_path: PathBuf::new(),
        }
    }

    pub fn store(&self) -> &InMemoryBlockStore {
        &self.store
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let engine = PromptEngine::new(&self.store);
        match command {
            Commands::Agent {
                agent_id,
                drafts,
                sectioned,
                format,
            } => {
                let target = if *sectioned {
                    CompileTarget::AgentSectioned(agent_id.clone())
                } else {
                    CompileTarget::Agent(agent_id.clone())
                };
                let drafts = load_drafts(drafts.as_deref())?;
                let result = engine.compile(&target, drafts.as_ref());
                match format {
                    OutputFormat::Text => Ok(format_compiled_text(&target, &result, &self.budget)),
                    OutputFormat::Json => format_compiled_json(&target, &result, &self.budget),
                }
            }
            Commands::Skillpack {
                skillpack_id,
                drafts,
                format,
            } => {
                let target = CompileTarget::Skillpack(skillpack_id.clone());
                let drafts = load_drafts(drafts.as_deref())?;
                let result = engine.compile(&target, drafts.as_ref());
                match format {
                    OutputFormat::Text => Ok(format_compiled_text(&target, &result, &self.budget)),
                    OutputFormat::Json => format_compiled_json(&target, &result, &self.budget),
                }
            }
            Commands::Blocks {
                agent_id,
                drafts,
                format,
            } => {
                let drafts = load_drafts(drafts.as_deref())?.unwrap_or_default();
                let result = engine.compile_agent(agent_id, Some(&drafts));
                match format {
                    OutputFormat::Text => Ok(format_blocks_table(&result, &drafts)),
                    OutputFormat::Json => format_blocks_json(&result, &drafts),
                }
            }
            Commands::Diff {
                agent_id,
                drafts,
                sectioned,
                format,
            } => {
                let target = if *sectioned {
                    CompileTarget::AgentSectioned(agent_id.clone())
                } else {
                    CompileTarget::Agent(agent_id.clone())
                };
                let drafts = read_drafts(drafts)?;
                let status = engine.draft_status(&target, &drafts);
                match format {
                    OutputFormat::Text => Ok(format_draft_status_text(&target, &status)),
                    OutputFormat::Json => format_draft_status_json(&target, &status),
                }
            }
        }
    }
}

/// Load configuration from an explicit file or the workspace layers, then validate.
pub fn load_config(workspace_root: &Path, config_path: Option<&Path>) -> Result<PromptcConfig, ApiError> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load(workspace_root)?,
    };
    config.validate().map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ApiError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            error_msgs.join("\n")
        ))
    })?;
    Ok(config)
}

fn load_drafts(path: Option<&Path>) -> Result<Option<DraftOverlay>, ApiError> {
    path.map(read_drafts).transpose()
}

fn read_drafts(path: &Path) -> Result<DraftOverlay, ApiError> {
    let text = std::fs::read_to_string(path).map_err(|source| ApiError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let drafts = DraftOverlay::from_json_str(&text)?;
    debug!(path = %path.display(), drafts = drafts.len(), "Loaded drafts");
    Ok(drafts)
}
