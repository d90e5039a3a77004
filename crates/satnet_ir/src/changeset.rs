//! Batched structural edits applied to the store in one step.

use crate::entity::{Entity, FlipFlopKey};

/// A group of removals and inserts forming one structural change.
///
/// Rewrite rules gather matches first, then build one `ChangeSet` per match
/// and hand it to [`Store::apply`](crate::Store::apply). Because `apply`
/// borrows the store mutably for the whole batch, no reader can observe a
/// new flip-flop without its supporting wires, selectors, and concats.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub(crate) removals: Vec<FlipFlopKey>,
    pub(crate) inserts: Vec<Entity>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a row for insert-if-absent.
    pub fn insert(&mut self, row: impl Into<Entity>) {
        self.inserts.push(row.into());
    }

    /// Queues a flip-flop for removal.
    pub fn remove_flip_flop(&mut self, key: FlipFlopKey) {
        self.removals.push(key);
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.inserts.is_empty()
    }

    /// Rows queued for insertion, in order.
    pub fn inserts(&self) -> &[Entity] {
        &self.inserts
    }
}

/// What [`Store::apply`](crate::Store::apply) actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Rows inserted.
    pub inserted: usize,
    /// Rows dropped because their key already existed.
    pub duplicates: usize,
    /// Flip-flops removed.
    pub removed: usize,
}

impl ApplyOutcome {
    /// Returns `true` if the store changed.
    pub fn changed(&self) -> bool {
        self.inserted > 0 || self.removed > 0
    }
}
