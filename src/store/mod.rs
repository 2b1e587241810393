//! Block Store
//!
//! Holds prompt blocks partitioned by scope: shared blocks, per-agent
//! overlays and per-skillpack prompts. The engine only ever reads from a
//! store; canonical content changes by publishing a new snapshot.

pub mod cell;
pub mod snapshot;

pub use cell::SnapshotCell;
pub use snapshot::{load_snapshot, parse_snapshot, SnapshotFormat};

use crate::block::{BlockScope, PromptBlock};
use crate::error::StoreError;
use crate::types::{AgentId, SkillpackId};
use std::collections::HashMap;

/// Read access to a block store snapshot
///
/// Keyed lookups are total: an unknown agent or skillpack yields an empty
/// slice, never an error.
pub trait BlockStore {
    /// Shared blocks in store order
    fn shared_blocks(&self) -> &[PromptBlock];

    /// Overlay blocks for an agent in store order (empty on miss)
    fn agent_overlay(&self, agent_id: &str) -> &[PromptBlock];

    /// Prompt blocks for a skillpack in store order (empty on miss)
    fn skillpack_prompt(&self, skillpack_id: &str) -> &[PromptBlock];
}

/// Where a block lives inside the store
#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockLocation {
    Shared(usize),
    Agent(AgentId, usize),
    Skillpack(SkillpackId, usize),
}

impl BlockLocation {
    fn describe(&self) -> String {
        match self {
            BlockLocation::Shared(_) => "shared blocks".to_string(),
            BlockLocation::Agent(id, _) => format!("agent overlay '{}'", id),
            BlockLocation::Skillpack(id, _) => format!("skillpack '{}'", id),
        }
    }
}

/// Immutable in-memory block store
///
/// Built through [`BlockStoreBuilder`], which enforces global id uniqueness
/// and that every collection only holds blocks of its own scope.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlockStore {
    shared: Vec<PromptBlock>,
    agents: HashMap<AgentId, Vec<PromptBlock>>,
    agent_order: Vec<AgentId>,
    skillpacks: HashMap<SkillpackId, Vec<PromptBlock>>,
    skillpack_order: Vec<SkillpackId>,
    index: HashMap<String, BlockLocation>,
}

impl InMemoryBlockStore {
    pub fn builder() -> BlockStoreBuilder {
        BlockStoreBuilder::default()
    }

    /// Look up a block by id across all scopes
    pub fn block(&self, block_id: &str) -> Option<&PromptBlock> {
        match self.index.get(block_id)? {
            BlockLocation::Shared(i) => self.shared.get(*i),
            BlockLocation::Agent(agent_id, i) => self.agents.get(agent_id)?.get(*i),
            BlockLocation::Skillpack(skillpack_id, i) => self.skillpacks.get(skillpack_id)?.get(*i),
        }
    }

    /// Agents that own at least one overlay collection, in insertion order
    pub fn agent_ids(&self) -> &[AgentId] {
        &self.agent_order
    }

    /// Skillpacks with a prompt collection, in insertion order
    pub fn skillpack_ids(&self) -> &[SkillpackId] {
        &self.skillpack_order
    }

    /// Total number of blocks across all scopes
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl BlockStore for InMemoryBlockStore {
    fn shared_blocks(&self) -> &[PromptBlock] {
        &self.shared
    }

    fn agent_overlay(&self, agent_id: &str) -> &[PromptBlock] {
        self.agents.get(agent_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn skillpack_prompt(&self, skillpack_id: &str) -> &[PromptBlock] {
        self.skillpacks
            .get(skillpack_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Builder for [`InMemoryBlockStore`]
///
/// Blocks keep the order in which they are added to their collection.
#[derive(Debug, Default)]
pub struct BlockStoreBuilder {
    shared: Vec<PromptBlock>,
    agents: Vec<(AgentId, Vec<PromptBlock>)>,
    skillpacks: Vec<(SkillpackId, Vec<PromptBlock>)>,
}

impl BlockStoreBuilder {
    pub fn shared_block(mut self, block: PromptBlock) -> Self {
        self.shared.push(block);
        self
    }

    pub fn agent_block(mut self, agent_id: impl Into<AgentId>, block: PromptBlock) -> Self {
        push_keyed(&mut self.agents, agent_id.into(), block);
        self
    }

    pub fn skillpack_block(mut self, skillpack_id: impl Into<SkillpackId>, block: PromptBlock) -> Self {
        push_keyed(&mut self.skillpacks, skillpack_id.into(), block);
        self
    }

    /// Register an agent with no overlay blocks yet
    pub fn agent(mut self, agent_id: impl Into<AgentId>) -> Self {
        let agent_id = agent_id.into();
        if !self.agents.iter().any(|(id, _)| *id == agent_id) {
            self.agents.push((agent_id, Vec::new()));
        }
        self
    }

    pub fn build(self) -> Result<InMemoryBlockStore, StoreError> {
        let mut index: HashMap<String, BlockLocation> = HashMap::new();

        for (i, block) in self.shared.iter().enumerate() {
            index_block(&mut index, block, BlockScope::Shared, BlockLocation::Shared(i))?;
        }

        let mut agents = HashMap::new();
        let mut agent_order = Vec::with_capacity(self.agents.len());
        for (agent_id, blocks) in self.agents {
            for (i, block) in blocks.iter().enumerate() {
                let location = BlockLocation::Agent(agent_id.clone(), i);
                index_block(&mut index, block, BlockScope::Agent, location)?;
            }
            agent_order.push(agent_id.clone());
            agents.insert(agent_id, blocks);
        }

        let mut skillpacks = HashMap::new();
        let mut skillpack_order = Vec::with_capacity(self.skillpacks.len());
        for (skillpack_id, blocks) in self.skillpacks {
            for (i, block) in blocks.iter().enumerate() {
                let location = BlockLocation::Skillpack(skillpack_id.clone(), i);
                index_block(&mut index, block, BlockScope::Skillpack, location)?;
            }
            skillpack_order.push(skillpack_id.clone());
            skillpacks.insert(skillpack_id, blocks);
        }

        Ok(InMemoryBlockStore {
            shared: self.shared,
            agents,
            agent_order,
            skillpacks,
            skillpack_order,
            index,
        })
    }
}

fn push_keyed(collections: &mut Vec<(String, Vec<PromptBlock>)>, key: String, block: PromptBlock) {
    match collections.iter_mut().find(|(id, _)| *id == key) {
        Some((_, blocks)) => blocks.push(block),
        None => collections.push((key, vec![block])),
    }
}

fn index_block(
    index: &mut HashMap<String, BlockLocation>,
    block: &PromptBlock,
    expected: BlockScope,
    location: BlockLocation,
) -> Result<(), StoreError> {
    if block.scope != expected {
        return Err(StoreError::ScopeMismatch {
            id: block.id.clone(),
            expected,
            actual: block.scope,
        });
    }
    if let Some(existing) = index.get(&block.id) {
        return Err(StoreError::DuplicateBlockId {
            id: block.id.clone(),
            first: existing.describe(),
            second: location.describe(),
        });
    }
    index.insert(block.id.clone(), location);
    Ok(())
}
