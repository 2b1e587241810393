//! promptc: Deterministic Prompt Compilation
//!
//! Assembles an agent's effective system prompt from scoped prompt blocks
//! (shared, agent overlay, skillpack), overlays unsaved drafts at read time,
//! and summarizes the result with a token estimate and a content
//! fingerprint. Every compilation is a pure function of the block store
//! snapshot, the requested id and the draft map.

pub mod block;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod draft;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod resolver;
pub mod store;
pub mod tokens;
pub mod types;

pub use block::{BlockScope, PromptBlock};
pub use draft::{apply_drafts, DraftOverlay};
pub use engine::{CompileTarget, CompiledPrompt, DraftStatus, PromptEngine};
pub use fingerprint::{fingerprint, Fingerprint};
pub use resolver::{resolve_for_agent, resolve_for_skillpack};
pub use store::{BlockStore, InMemoryBlockStore};
pub use tokens::estimate_tokens;
