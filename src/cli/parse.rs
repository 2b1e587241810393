//! CLI parse: clap types for promptc. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// promptc - compile and inspect agent system prompts
#[derive(Parser, Debug)]
#[command(name = "promptc")]
#[command(about = "Compile scoped prompt blocks into agent system prompts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Block snapshot file (overrides store.snapshot_path)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an agent's full prompt (shared blocks, then the agent overlay)
    Agent {
        /// Agent id
        agent_id: String,
        /// JSON file of unsaved drafts: {"<block id>": "<content>"}
        #[arg(long)]
        drafts: Option<PathBuf>,
        /// Mark the boundary between shared and agent-specific content
        #[arg(long)]
        sectioned: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Compile a skillpack prompt
    Skillpack {
        /// Skillpack id
        skillpack_id: String,
        #[arg(long)]
        drafts: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List the blocks resolved for an agent
    Blocks {
        /// Agent id
        agent_id: String,
        #[arg(long)]
        drafts: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Report whether drafts change an agent's compiled prompt
    Diff {
        /// Agent id
        agent_id: String,
        #[arg(long)]
        drafts: PathBuf,
        #[arg(long)]
        sectioned: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
