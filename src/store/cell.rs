//! Snapshot handoff between an external save flow and concurrent readers.

use crate::store::InMemoryBlockStore;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Holds the current block store snapshot
///
/// Readers take an `Arc` to the snapshot and compile against it for as long
/// as they like; publishing a new snapshot never disturbs them. The lock is
/// only held long enough to clone or swap the `Arc`.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    current: RwLock<Arc<InMemoryBlockStore>>,
}

impl SnapshotCell {
    pub fn new(store: InMemoryBlockStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// Current snapshot
    pub fn load(&self) -> Arc<InMemoryBlockStore> {
        self.current.read().clone()
    }

    /// Replace the snapshot, returning the previous one
    pub fn publish(&self, store: InMemoryBlockStore) -> Arc<InMemoryBlockStore> {
        let next = Arc::new(store);
        debug!(blocks = next.len(), "Publishing block snapshot");
        std::mem::replace(&mut *self.current.write(), next)
    }
}
