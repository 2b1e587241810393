//! Prompt Engine
//!
//! Stateless façade over a block store snapshot: resolve, apply drafts,
//! compile, then estimate tokens and fingerprint the result. Every call
//! recomputes from the snapshot; nothing is cached.

use crate::block::PromptBlock;
use crate::compiler::{compile, compile_sectioned};
use crate::draft::{apply_drafts, DraftOverlay};
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::resolver::{resolve_agent_sections, resolve_for_skillpack};
use crate::store::BlockStore;
use crate::tokens::estimate_tokens;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileTarget {
    /// Shared blocks then the agent's overlay, plain concatenation
    Agent(String),
    /// Shared and agent sections separated by the section marker
    AgentSectioned(String),
    /// A skillpack prompt on its own
    Skillpack(String),
}

impl CompileTarget {
    pub fn id(&self) -> &str {
        match self {
            CompileTarget::Agent(id)
            | CompileTarget::AgentSectioned(id)
            | CompileTarget::Skillpack(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CompileTarget::Agent(_) => "agent",
            CompileTarget::AgentSectioned(_) => "agent-sectioned",
            CompileTarget::Skillpack(_) => "skillpack",
        }
    }
}

/// Result of one compilation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledPrompt {
    /// Resolved blocks with drafts applied
    pub ordered_blocks: Vec<PromptBlock>,
    pub compiled_text: String,
    pub token_estimate: usize,
    pub fingerprint: Fingerprint,
}

impl CompiledPrompt {
    fn new(ordered_blocks: Vec<PromptBlock>, compiled_text: String) -> Self {
        let token_estimate = estimate_tokens(&compiled_text);
        let fingerprint = fingerprint(&compiled_text);
        Self {
            ordered_blocks,
            compiled_text,
            token_estimate,
            fingerprint,
        }
    }
}

/// Canonical vs drafted fingerprints for a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStatus {
    pub canonical: Fingerprint,
    pub drafted: Fingerprint,
    /// Compiled text differs once drafts are applied
    pub dirty: bool,
    /// Resolved blocks whose draft differs from canonical content, in order
    pub modified_block_ids: Vec<String>,
    /// Draft ids outside the resolved set (ignored)
    pub ignored_draft_ids: Vec<String>,
}

/// Prompt compilation over a borrowed block store snapshot
pub struct PromptEngine<'a, S: BlockStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: BlockStore + ?Sized> PromptEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Compile an agent's full prompt
    pub fn compile_agent(&self, agent_id: &str, drafts: Option<&DraftOverlay>) -> CompiledPrompt {
        self.compile(&CompileTarget::Agent(agent_id.to_string()), drafts)
    }

    /// Compile an agent's prompt with shared and agent-specific sections marked
    pub fn compile_agent_sectioned(
        &self,
        agent_id: &str,
        drafts: Option<&DraftOverlay>,
    ) -> CompiledPrompt {
        self.compile(&CompileTarget::AgentSectioned(agent_id.to_string()), drafts)
    }

    /// Compile a skillpack prompt
    pub fn compile_skillpack(
        &self,
        skillpack_id: &str,
        drafts: Option<&DraftOverlay>,
    ) -> CompiledPrompt {
        self.compile(&CompileTarget::Skillpack(skillpack_id.to_string()), drafts)
    }

    pub fn compile(&self, target: &CompileTarget, drafts: Option<&DraftOverlay>) -> CompiledPrompt {
        let empty = DraftOverlay::new();
        let drafts = drafts.unwrap_or(&empty);

        let result = match target {
            CompileTarget::Agent(agent_id) => {
                let sections = resolve_agent_sections(self.store, agent_id);
                let blocks = apply_drafts(&sections.into_ordered(), drafts);
                let text = compile(&blocks);
                CompiledPrompt::new(blocks, text)
            }
            CompileTarget::AgentSectioned(agent_id) => {
                let sections = resolve_agent_sections(self.store, agent_id);
                let shared = apply_drafts(&sections.shared, drafts);
                let agent = apply_drafts(&sections.agent, drafts);
                let text = compile_sectioned(&shared, &agent);
                let mut blocks = shared;
                blocks.extend(agent);
                CompiledPrompt::new(blocks, text)
            }
            CompileTarget::Skillpack(skillpack_id) => {
                let blocks = apply_drafts(&resolve_for_skillpack(self.store, skillpack_id), drafts);
                let text = compile(&blocks);
                CompiledPrompt::new(blocks, text)
            }
        };

        debug!(
            kind = target.kind(),
            id = target.id(),
            blocks = result.ordered_blocks.len(),
            drafts = drafts.len(),
            tokens = result.token_estimate,
            fingerprint = %result.fingerprint,
            "Compiled prompt"
        );
        result
    }

    /// Compare the target compiled with and without drafts
    pub fn draft_status(&self, target: &CompileTarget, drafts: &DraftOverlay) -> DraftStatus {
        let canonical = self.compile(target, None);
        let drafted = self.compile(target, Some(drafts));

        let modified_block_ids = canonical
            .ordered_blocks
            .iter()
            .filter(|b| drafts.is_modified(b))
            .map(|b| b.id.clone())
            .collect();
        let ignored_draft_ids = drafts
            .unknown_ids(&canonical.ordered_blocks)
            .into_iter()
            .map(str::to_string)
            .collect();

        DraftStatus {
            dirty: canonical.fingerprint != drafted.fingerprint,
            canonical: canonical.fingerprint,
            drafted: drafted.fingerprint,
            modified_block_ids,
            ignored_draft_ids,
        }
    }
}
