//! Opaque identifier shared by every netlist entity.
//!
//! Wires, and therefore every pin that refers to a wire, draw their IDs from a
//! single namespace. IDs supplied by the netlist loader and IDs synthesized by
//! rewrite rules live side by side; the allocator in `satnet_ir` keeps them
//! disjoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, copyable ID for a wire in the netlist.
///
/// Ordered so that entity tables can be kept in deterministic key order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates an ID from a raw `u64` value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw `u64` value.
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Returns the ID immediately after this one, or `None` on overflow.
    pub fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_roundtrip() {
        let id = NodeId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
    }

    #[test]
    fn id_ordering() {
        assert!(NodeId::from_raw(3) < NodeId::from_raw(10));
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(NodeId::from_raw(1));
        set.insert(NodeId::from_raw(2));
        set.insert(NodeId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn successor_overflow() {
        assert_eq!(NodeId::from_raw(7).successor(), Some(NodeId::from_raw(8)));
        assert_eq!(NodeId::from_raw(u64::MAX).successor(), None);
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&NodeId::from_raw(99)).unwrap();
        assert_eq!(json, "99");
        let back: NodeId = serde_json::from_str("99").unwrap();
        assert_eq!(back, NodeId::from_raw(99));
    }

    #[test]
    fn display_and_debug() {
        let id = NodeId::from_raw(5);
        assert_eq!(format!("{id}"), "5");
        assert_eq!(format!("{id:?}"), "n5");
    }
}
