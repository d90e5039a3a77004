//! Fresh identifier allocation for synthesized wires.

use crate::store::Store;
use satnet_common::NodeId;

/// Hands out wire IDs that have never appeared in the store.
///
/// Seeded from the largest ID present in the loaded netlist, so synthesized
/// IDs can never collide with netlist IDs however large the input is. Once
/// the 64-bit ID space runs out, every further request yields `None`.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: Option<NodeId>,
}

impl IdAllocator {
    /// Creates an allocator whose first ID is `first`.
    pub fn starting_at(first: NodeId) -> Self {
        Self { next: Some(first) }
    }

    /// Creates an allocator whose first ID is one past the store's largest ID.
    ///
    /// An empty store starts at 1. A store that already uses `u64::MAX`
    /// yields an exhausted allocator.
    pub fn seeded_from(store: &Store) -> Self {
        let next = match store.max_id() {
            Some(max) => max.successor(),
            None => Some(NodeId::from_raw(1)),
        };
        Self { next }
    }

    /// Returns a fresh ID, or `None` when no unused ID is left.
    /// IDs are strictly increasing.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = id.successor();
        Some(id)
    }

    /// Returns the ID the next call to [`next`](Self::next) will produce.
    pub fn peek(&self) -> Option<NodeId> {
        self.next
    }
}
