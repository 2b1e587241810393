//! Draft Overlay
//!
//! Caller-owned map from block id to edited content, merged over canonical
//! content at read time. Applying drafts produces new blocks; the canonical
//! blocks and the store are never touched. Drafts keyed to blocks outside
//! the resolved set have no effect.

use crate::block::PromptBlock;
use crate::error::ApiError;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Unsaved edits keyed by block id
///
/// Backed by a `BTreeMap` so iteration (and anything derived from it) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftOverlay {
    drafts: BTreeMap<BlockId, String>,
}

impl DraftOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, block_id: impl Into<BlockId>, content: impl Into<String>) -> Option<String> {
        self.drafts.insert(block_id.into(), content.into())
    }

    pub fn with_draft(mut self, block_id: impl Into<BlockId>, content: impl Into<String>) -> Self {
        self.insert(block_id, content);
        self
    }

    pub fn remove(&mut self, block_id: &str) -> Option<String> {
        self.drafts.remove(block_id)
    }

    pub fn get(&self, block_id: &str) -> Option<&str> {
        self.drafts.get(block_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = &str> {
        self.drafts.keys().map(String::as_str)
    }

    /// Draft content when present, canonical content otherwise
    pub fn effective_content<'a>(&'a self, block: &'a PromptBlock) -> &'a str {
        self.get(&block.id).unwrap_or(&block.content)
    }

    /// True when a draft exists for the block and differs from canonical content
    pub fn is_modified(&self, block: &PromptBlock) -> bool {
        self.get(&block.id)
            .map(|draft| draft != block.content)
            .unwrap_or(false)
    }

    /// Draft ids that match none of the given blocks
    pub fn unknown_ids(&self, blocks: &[PromptBlock]) -> Vec<&str> {
        self.block_ids()
            .filter(|id| !blocks.iter().any(|b| b.id == *id))
            .collect()
    }

    /// Parse a JSON object of `{ "<block id>": "<content>" }`
    ///
    /// Any non-string value is rejected.
    pub fn from_json_str(text: &str) -> Result<Self, ApiError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(|e| ApiError::InvalidDraft {
            block_id: String::new(),
            message: format!("drafts must be a JSON object: {}", e),
        })?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ApiError> {
        let object = match value {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(ApiError::InvalidDraft {
                    block_id: String::new(),
                    message: format!("drafts must be a JSON object, got {}", json_kind(&other)),
                })
            }
        };

        let mut overlay = DraftOverlay::new();
        for (block_id, value) in object {
            match value {
                serde_json::Value::String(content) => {
                    overlay.insert(block_id, content);
                }
                other => {
                    return Err(ApiError::InvalidDraft {
                        block_id,
                        message: format!("draft content must be a string, got {}", json_kind(&other)),
                    })
                }
            }
        }
        Ok(overlay)
    }
}

impl FromIterator<(BlockId, String)> for DraftOverlay {
    fn from_iter<I: IntoIterator<Item = (BlockId, String)>>(iter: I) -> Self {
        Self {
            drafts: iter.into_iter().collect(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Merge drafts over canonical content
///
/// Returns new blocks with identical `id`, `name`, `scope` and `file_path`;
/// only `content` differs, and only for ids present in `drafts`.
pub fn apply_drafts(blocks: &[PromptBlock], drafts: &DraftOverlay) -> Vec<PromptBlock> {
    if drafts.is_empty() {
        return blocks.to_vec();
    }

    let unknown = drafts.unknown_ids(blocks);
    if !unknown.is_empty() {
        debug!(?unknown, "Ignoring drafts for blocks outside the resolved set");
    }

    blocks
        .iter()
        .map(|block| match drafts.get(&block.id) {
            Some(draft) => block.with_content(draft),
            None => block.clone(),
        })
        .collect()
}
