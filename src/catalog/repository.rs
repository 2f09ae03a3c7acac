//! Holds one or more loaded snapshots for lookup by key.
//!
//! Versioned snapshot files are distinct immutable documents; nothing is
//! migrated in place. The repository keeps snapshot selection explicit when
//! several versions are loaded side by side, e.g. to compare a validated
//! snapshot against its predecessor.

use crate::catalog::identity::{Category, SnapshotKey};
use crate::catalog::index::ComponentIndex;
use crate::catalog::model::ComponentRef;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
/// In-memory store for loaded snapshots keyed by `SnapshotKey`.
pub struct CatalogRepository {
    snapshots: BTreeMap<SnapshotKey, ComponentIndex>,
}

impl CatalogRepository {
    /// Register a loaded snapshot for later lookup.
    pub fn register(&mut self, index: ComponentIndex) {
        self.snapshots.insert(index.key().clone(), index);
    }

    /// Fetch a snapshot by key, if present.
    pub fn get(&self, key: &SnapshotKey) -> Option<&ComponentIndex> {
        self.snapshots.get(key)
    }

    /// Resolve a component inside a registered snapshot.
    pub fn find_component(
        &self,
        key: &SnapshotKey,
        category: Category,
        name: &str,
    ) -> Option<ComponentRef<'_>> {
        self.get(key)?.get(category, name).ok()
    }

    /// Registered snapshot keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &SnapshotKey> {
        self.snapshots.keys()
    }
}
