//! Prompt blocks: the atomic, scoped units of prompt content.

use crate::types::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composition tier a block belongs to
///
/// Fixed at creation. Determines which resolution path includes the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockScope {
    /// Applied to every agent
    Shared,
    /// Overlay specific to one agent
    Agent,
    /// Part of a reusable skillpack prompt
    Skillpack,
}

impl BlockScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockScope::Shared => "shared",
            BlockScope::Agent => "agent",
            BlockScope::Skillpack => "skillpack",
        }
    }
}

impl fmt::Display for BlockScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, scoped unit of instructional text
///
/// `content` is the canonical (saved) body. Position within the owning
/// collection is the block's order; there is no explicit order field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptBlock {
    pub id: BlockId,
    pub name: String,
    pub scope: BlockScope,
    pub content: String,
    /// Provenance label for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl PromptBlock {
    pub fn new(
        id: impl Into<BlockId>,
        name: impl Into<String>,
        scope: BlockScope,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scope,
            content: content.into(),
            file_path: None,
        }
    }

    pub fn shared(id: impl Into<BlockId>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, name, BlockScope::Shared, content)
    }

    pub fn agent(id: impl Into<BlockId>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, name, BlockScope::Agent, content)
    }

    pub fn skillpack(
        id: impl Into<BlockId>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(id, name, BlockScope::Skillpack, content)
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Copy of this block carrying different content; identity fields are kept.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            scope: self.scope,
            content: content.into(),
            file_path: self.file_path.clone(),
        }
    }
}
