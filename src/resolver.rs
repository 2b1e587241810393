//! Block Resolver
//!
//! Computes the ordered block list that applies to an agent (shared blocks
//! first, then the agent's overlay) or to a skillpack. Store order is
//! preserved exactly; nothing is re-sorted by name or id. Unknown ids
//! resolve to an empty overlay instead of failing.

use crate::block::PromptBlock;
use crate::store::BlockStore;
use tracing::debug;

/// Agent resolution with the shared/agent partition kept intact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAgentBlocks {
    pub shared: Vec<PromptBlock>,
    pub agent: Vec<PromptBlock>,
}

impl ResolvedAgentBlocks {
    /// Flattened sequence: every shared block precedes every overlay block
    pub fn ordered(&self) -> Vec<PromptBlock> {
        self.shared.iter().chain(self.agent.iter()).cloned().collect()
    }

    pub fn into_ordered(self) -> Vec<PromptBlock> {
        let mut blocks = self.shared;
        blocks.extend(self.agent);
        blocks
    }

    pub fn len(&self) -> usize {
        self.shared.len() + self.agent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_empty() && self.agent.is_empty()
    }
}

/// Resolve the shared and overlay blocks for an agent, kept apart
pub fn resolve_agent_sections<S: BlockStore + ?Sized>(store: &S, agent_id: &str) -> ResolvedAgentBlocks {
    let shared = store.shared_blocks().to_vec();
    let agent = store.agent_overlay(agent_id).to_vec();
    debug!(
        agent_id,
        shared = shared.len(),
        overlay = agent.len(),
        "Resolved agent blocks"
    );
    ResolvedAgentBlocks { shared, agent }
}

/// Ordered blocks for an agent: shared blocks, then the agent's overlay
pub fn resolve_for_agent<S: BlockStore + ?Sized>(store: &S, agent_id: &str) -> Vec<PromptBlock> {
    resolve_agent_sections(store, agent_id).into_ordered()
}

/// Ordered blocks for a skillpack; shared blocks are never injected
pub fn resolve_for_skillpack<S: BlockStore + ?Sized>(store: &S, skillpack_id: &str) -> Vec<PromptBlock> {
    let blocks = store.skillpack_prompt(skillpack_id).to_vec();
    debug!(skillpack_id, blocks = blocks.len(), "Resolved skillpack blocks");
    blocks
}
