//! Structural validation of a store.
//!
//! Checks that every wire a row refers to is declared, that wires have a
//! nonzero width, and that selector and concat bit ranges fit the wire they
//! index. The loader treats any violation as fatal; tests use the same check
//! after rewriting to prove no rule leaves an orphan reference behind.

use crate::entity::Entity;
use crate::store::Store;
use satnet_common::NodeId;
use std::fmt;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `entity` references `wire`, which has no wire row.
    DanglingWireReference {
        /// The referencing row.
        entity: Entity,
        /// The undeclared wire.
        wire: NodeId,
    },
    /// A wire was declared with width zero.
    ZeroWidthWire {
        /// The wire.
        wire: NodeId,
    },
    /// A selector or concat addresses `bit` of a `width`-bit wire.
    RangeOutOfBounds {
        /// The selector or concat row.
        entity: Entity,
        /// The wire being indexed.
        wire: NodeId,
        /// The offending bit index.
        bit: u32,
        /// The wire's declared width.
        width: u32,
    },
    /// A selector or concat has `left > right`.
    InvertedRange {
        /// The selector or concat row.
        entity: Entity,
    },
}

impl Violation {
    /// The row the violation is reported against.
    pub fn entity(&self) -> Entity {
        match self {
            Violation::DanglingWireReference { entity, .. }
            | Violation::RangeOutOfBounds { entity, .. }
            | Violation::InvertedRange { entity } => *entity,
            Violation::ZeroWidthWire { wire } => Entity::Wire(crate::entity::Wire {
                id: *wire,
                width: 0,
            }),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DanglingWireReference { entity, wire } => write!(
                f,
                "{} {} references undeclared wire {wire}",
                entity.table(),
                entity.render()
            ),
            Violation::ZeroWidthWire { wire } => write!(f, "wire {wire} has width 0"),
            Violation::RangeOutOfBounds {
                entity,
                wire,
                bit,
                width,
            } => write!(
                f,
                "{} {} uses bit {bit} of wire {wire}, which is only {width} bits wide",
                entity.table(),
                entity.render()
            ),
            Violation::InvertedRange { entity } => write!(
                f,
                "{} {} has its low bit above its high bit",
                entity.table(),
                entity.render()
            ),
        }
    }
}

/// Returns every invariant violation in the store, in table order.
pub fn validate(store: &Store) -> Vec<Violation> {
    let mut violations = Vec::new();

    for wire in store.wires() {
        if wire.width == 0 {
            violations.push(Violation::ZeroWidthWire { wire: wire.id });
        }
    }

    for entity in store.entities() {
        if let Entity::Wire(_) = entity {
            continue;
        }
        for wire in entity.wire_refs() {
            if store.wire(wire).is_none() {
                violations.push(Violation::DanglingWireReference { entity, wire });
            }
        }

        let ranged = match entity {
            Entity::Selector(s) => Some((s.input, s.left, s.right)),
            Entity::Concat(c) => Some((c.output, c.left, c.right)),
            _ => None,
        };
        let Some((wide, left, right)) = ranged else {
            continue;
        };
        if left > right {
            violations.push(Violation::InvertedRange { entity });
            continue;
        }
        if let Some(width) = store.wire_width(wide) {
            if right >= width {
                violations.push(Violation::RangeOutOfBounds {
                    entity,
                    wire: wide,
                    bit: right,
                    width,
                });
            }
        }
    }

    violations
}
