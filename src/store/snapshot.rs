//! Snapshot files: read-only loading of a block store from TOML or JSON.
//!
//! Document shape:
//!
//! ```toml
//! [[shared]]
//! id = "s1"
//! name = "Tone"
//! content = "Be concise."
//!
//! [[agents.eli]]
//! id = "a1"
//! name = "Inbox"
//! content = "You triage inbox threads."
//!
//! [[skillpacks.triage]]
//! id = "k1"
//! content = "Sort by severity."
//! ```
//!
//! A block's scope is implied by its collection. An explicit `scope` field
//! that disagrees is rejected. Content that is missing, null or not a
//! string is read as empty text.

use crate::block::{BlockScope, PromptBlock};
use crate::error::StoreError;
use crate::store::{BlockStoreBuilder, InMemoryBlockStore};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Snapshot serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Toml,
    Json,
}

impl SnapshotFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Toml,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    shared: Vec<RawBlock>,
    #[serde(default)]
    agents: KeyedCollections,
    #[serde(default)]
    skillpacks: KeyedCollections,
}

/// Keyed block collections in document order
#[derive(Debug, Default)]
struct KeyedCollections(Vec<(String, Vec<RawBlock>)>);

impl<'de> Deserialize<'de> for KeyedCollections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionsVisitor;

        impl<'de> Visitor<'de> for CollectionsVisitor {
            type Value = KeyedCollections;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of id to block list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Vec<RawBlock>)> = Vec::new();
                while let Some((key, blocks)) = map.next_entry::<String, Vec<RawBlock>>()? {
                    // repeated keys extend the earlier collection
                    match entries.iter_mut().find(|(id, _)| *id == key) {
                        Some((_, existing)) => existing.extend(blocks),
                        None => entries.push((key, blocks)),
                    }
                }
                Ok(KeyedCollections(entries))
            }
        }

        deserializer.deserialize_map(CollectionsVisitor)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    scope: Option<BlockScope>,
    #[serde(default)]
    content: Option<RawContent>,
    #[serde(default, alias = "file_path")]
    file_path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawContent {
    Text(String),
    Other(IgnoredAny),
}

impl RawBlock {
    fn into_block(self, scope: BlockScope) -> Result<PromptBlock, StoreError> {
        if let Some(declared) = self.scope {
            if declared != scope {
                return Err(StoreError::ScopeMismatch {
                    id: self.id,
                    expected: scope,
                    actual: declared,
                });
            }
        }

        let content = match self.content {
            Some(RawContent::Text(text)) => text,
            Some(RawContent::Other(_)) => {
                warn!(block_id = %self.id, "Non-string block content; compiling as empty");
                String::new()
            }
            None => {
                warn!(block_id = %self.id, "Missing or null block content; compiling as empty");
                String::new()
            }
        };

        let name = self.name.unwrap_or_else(|| self.id.clone());
        Ok(PromptBlock {
            id: self.id,
            name,
            scope,
            content,
            file_path: self.file_path,
        })
    }
}

/// Load a block store snapshot from disk
pub fn load_snapshot(path: &Path) -> Result<InMemoryBlockStore, StoreError> {
    let text = std::fs::read_to_string(path)?;
    let store = parse_snapshot(&text, SnapshotFormat::from_path(path), path)?;
    debug!(
        path = %path.display(),
        blocks = store.len(),
        agents = store.agent_ids().len(),
        skillpacks = store.skillpack_ids().len(),
        "Loaded block snapshot"
    );
    Ok(store)
}

/// Parse snapshot text; `origin` is only used in error messages.
pub fn parse_snapshot(
    text: &str,
    format: SnapshotFormat,
    origin: &Path,
) -> Result<InMemoryBlockStore, StoreError> {
    let document: SnapshotDocument = match format {
        SnapshotFormat::Toml => toml::from_str(text).map_err(|e| StoreError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?,
        SnapshotFormat::Json => serde_json::from_str(text).map_err(|e| StoreError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?,
    };

    let mut builder = BlockStoreBuilder::default();
    for raw in document.shared {
        builder = builder.shared_block(raw.into_block(BlockScope::Shared)?);
    }
    for (agent_id, blocks) in document.agents.0 {
        builder = builder.agent(agent_id.clone());
        for raw in blocks {
            builder = builder.agent_block(agent_id.clone(), raw.into_block(BlockScope::Agent)?);
        }
    }
    for (skillpack_id, blocks) in document.skillpacks.0 {
        for raw in blocks {
            builder = builder
                .skillpack_block(skillpack_id.clone(), raw.into_block(BlockScope::Skillpack)?);
        }
    }
    builder.build()
}
