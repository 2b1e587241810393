//! Shared identifier and digest types.

/// Stable, globally unique identifier of a prompt block
pub type BlockId = String;

/// Identifier of an agent whose overlay blocks are layered over the shared set
pub type AgentId = String;

/// Identifier of a skillpack prompt collection
pub type SkillpackId = String;

/// 32-byte BLAKE3 digest
pub type Hash = [u8; 32];
