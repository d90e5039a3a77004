//! Entity row types stored in the IR tables.
//!
//! Each entity kind has a uniqueness key; the [`Store`](crate::Store) keeps at
//! most one row per key. Keys are small `Copy` structs ordered so that table
//! scans come out in a deterministic order.

use satnet_common::{GateType, NodeId, UnaryType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wire of `width` bits. Keyed by `id`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Wire {
    /// The wire's identifier.
    pub id: NodeId,
    /// Width in bits; must be at least 1.
    pub width: u32,
}

/// A two-input gate `y = type(a, b)`. Keyed by `(a, b, type)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct BinaryGate {
    /// First input wire.
    pub a: NodeId,
    /// Second input wire.
    pub b: NodeId,
    /// Output wire.
    pub y: NodeId,
    /// Gate function.
    #[serde(rename = "type")]
    pub ty: GateType,
}

/// Uniqueness key of a [`BinaryGate`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BinaryKey {
    /// First input wire.
    pub a: NodeId,
    /// Second input wire.
    pub b: NodeId,
    /// Gate function.
    pub ty: GateType,
}

/// A one-input gate `y = type(a)`. Keyed by `(a, type)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct UnaryGate {
    /// Input wire.
    pub a: NodeId,
    /// Output wire.
    pub y: NodeId,
    /// Gate function.
    #[serde(rename = "type")]
    pub ty: UnaryType,
}

/// Uniqueness key of a [`UnaryGate`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct UnaryKey {
    /// Input wire.
    pub a: NodeId,
    /// Gate function.
    pub ty: UnaryType,
}

/// A positive-edge flip-flop with positive enable (`$_DFFE_PP_`).
///
/// Keyed by `(d, c, e)`; the output `q` is not part of the key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct FlipFlop {
    /// Data input.
    pub d: NodeId,
    /// Clock.
    pub c: NodeId,
    /// Enable.
    pub e: NodeId,
    /// Registered output.
    pub q: NodeId,
}

/// Uniqueness key of a [`FlipFlop`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct FlipFlopKey {
    /// Data input.
    pub d: NodeId,
    /// Clock.
    pub c: NodeId,
    /// Enable.
    pub e: NodeId,
}

/// Drives `output` from bits `[left, right]` of `input`. Keyed by `(input, left, right)`.
///
/// Bit ranges are inclusive with `left` the low index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Selector {
    /// The wide wire being sliced.
    pub input: NodeId,
    /// The narrow wire receiving the slice.
    pub output: NodeId,
    /// Low bit index (inclusive).
    pub left: u32,
    /// High bit index (inclusive).
    pub right: u32,
}

/// Uniqueness key of a [`Selector`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SelectorKey {
    /// The wide wire being sliced.
    pub input: NodeId,
    /// Low bit index.
    pub left: u32,
    /// High bit index.
    pub right: u32,
}

/// Places `input` at bits `[left, right]` of `output`. Keyed by `(output, left, right)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Concat {
    /// The narrow wire being placed.
    pub input: NodeId,
    /// The wide wire being assembled.
    pub output: NodeId,
    /// Low bit index (inclusive).
    pub left: u32,
    /// High bit index (inclusive).
    pub right: u32,
}

/// Uniqueness key of a [`Concat`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ConcatKey {
    /// The wide wire being assembled.
    pub output: NodeId,
    /// Low bit index.
    pub left: u32,
    /// High bit index.
    pub right: u32,
}

/// A 2-to-1 multiplexer `y = s ? b : a`. The whole row is the key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Mux {
    /// Input selected when `s` is low.
    pub a: NodeId,
    /// Input selected when `s` is high.
    pub b: NodeId,
    /// Select.
    pub s: NodeId,
    /// Output.
    pub y: NodeId,
}

impl BinaryGate {
    /// Returns this row's uniqueness key.
    pub fn key(&self) -> BinaryKey {
        BinaryKey {
            a: self.a,
            b: self.b,
            ty: self.ty,
        }
    }

    /// Returns the same gate with `a` and `b` swapped.
    pub fn mirrored(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            ..*self
        }
    }
}

impl UnaryGate {
    /// Returns this row's uniqueness key.
    pub fn key(&self) -> UnaryKey {
        UnaryKey {
            a: self.a,
            ty: self.ty,
        }
    }
}

impl FlipFlop {
    /// Returns this row's uniqueness key.
    pub fn key(&self) -> FlipFlopKey {
        FlipFlopKey {
            d: self.d,
            c: self.c,
            e: self.e,
        }
    }
}

impl Selector {
    /// Returns this row's uniqueness key.
    pub fn key(&self) -> SelectorKey {
        SelectorKey {
            input: self.input,
            left: self.left,
            right: self.right,
        }
    }
}

impl Concat {
    /// Returns this row's uniqueness key.
    pub fn key(&self) -> ConcatKey {
        ConcatKey {
            output: self.output,
            left: self.left,
            right: self.right,
        }
    }
}

/// The entity tables of the IR.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Table {
    /// [`Wire`] rows.
    Wire,
    /// [`BinaryGate`] rows.
    BinaryGate,
    /// [`UnaryGate`] rows.
    UnaryGate,
    /// [`FlipFlop`] rows.
    FlipFlop,
    /// [`Selector`] rows.
    Selector,
    /// [`Concat`] rows.
    Concat,
    /// [`Mux`] rows.
    Mux,
}

impl Table {
    /// All tables in schema order.
    pub const ALL: [Table; 7] = [
        Table::Wire,
        Table::BinaryGate,
        Table::UnaryGate,
        Table::FlipFlop,
        Table::Selector,
        Table::Concat,
        Table::Mux,
    ];

    /// Returns the table's schema name.
    pub fn name(self) -> &'static str {
        match self {
            Table::Wire => "wire",
            Table::BinaryGate => "binary_gate",
            Table::UnaryGate => "unary_gate",
            Table::FlipFlop => "dffe_pp",
            Table::Selector => "selector",
            Table::Concat => "concat",
            Table::Mux => "mux",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row of any table, used for heterogeneous batches.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Entity {
    /// A wire row.
    Wire(Wire),
    /// A binary gate row.
    BinaryGate(BinaryGate),
    /// A unary gate row.
    UnaryGate(UnaryGate),
    /// A flip-flop row.
    FlipFlop(FlipFlop),
    /// A selector row.
    Selector(Selector),
    /// A concat row.
    Concat(Concat),
    /// A mux row.
    Mux(Mux),
}

impl Entity {
    /// Returns the table this row belongs to.
    pub fn table(&self) -> Table {
        match self {
            Entity::Wire(_) => Table::Wire,
            Entity::BinaryGate(_) => Table::BinaryGate,
            Entity::UnaryGate(_) => Table::UnaryGate,
            Entity::FlipFlop(_) => Table::FlipFlop,
            Entity::Selector(_) => Table::Selector,
            Entity::Concat(_) => Table::Concat,
            Entity::Mux(_) => Table::Mux,
        }
    }

    /// Returns every wire ID this row refers to, including its own ID for wires.
    pub fn wire_refs(&self) -> Vec<NodeId> {
        match *self {
            Entity::Wire(w) => vec![w.id],
            Entity::BinaryGate(g) => vec![g.a, g.b, g.y],
            Entity::UnaryGate(g) => vec![g.a, g.y],
            Entity::FlipFlop(f) => vec![f.d, f.c, f.e, f.q],
            Entity::Selector(s) => vec![s.input, s.output],
            Entity::Concat(c) => vec![c.input, c.output],
            Entity::Mux(m) => vec![m.a, m.b, m.s, m.y],
        }
    }

    /// Renders the row as a tuple in schema column order, e.g. `(1, 2, 3, $_AND_)`.
    pub fn render(&self) -> String {
        match *self {
            Entity::Wire(w) => format!("({}, {})", w.id, w.width),
            Entity::BinaryGate(g) => format!("({}, {}, {}, {})", g.a, g.b, g.y, g.ty),
            Entity::UnaryGate(g) => format!("({}, {}, {})", g.a, g.y, g.ty),
            Entity::FlipFlop(f) => format!("({}, {}, {}, {})", f.d, f.c, f.e, f.q),
            Entity::Selector(s) => {
                format!("({}, {}, {}, {})", s.input, s.output, s.left, s.right)
            }
            Entity::Concat(c) => format!("({}, {}, {}, {})", c.input, c.output, c.left, c.right),
            Entity::Mux(m) => format!("({}, {}, {}, {})", m.a, m.b, m.s, m.y),
        }
    }

    /// Renders just the uniqueness key of the row.
    pub fn render_key(&self) -> String {
        match *self {
            Entity::Wire(w) => format!("({})", w.id),
            Entity::BinaryGate(g) => format!("({}, {}, {})", g.a, g.b, g.ty),
            Entity::UnaryGate(g) => format!("({}, {})", g.a, g.ty),
            Entity::FlipFlop(f) => format!("({}, {}, {})", f.d, f.c, f.e),
            Entity::Selector(s) => format!("({}, {}, {})", s.input, s.left, s.right),
            Entity::Concat(c) => format!("({}, {}, {})", c.output, c.left, c.right),
            Entity::Mux(m) => format!("({}, {}, {}, {})", m.a, m.b, m.s, m.y),
        }
    }
}

macro_rules! impl_from_row {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Entity {
                fn from(row: $variant) -> Self {
                    Entity::$variant(row)
                }
            }
        )*
    };
}

impl_from_row!(Wire, BinaryGate, UnaryGate, FlipFlop, Selector, Concat, Mux);

#[cfg(test)]
mod tests {
    use super::*;

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    #[test]
    fn mirrored_swaps_inputs_only() {
        let g = BinaryGate {
            a: n(1),
            b: n(2),
            y: n(3),
            ty: GateType::And,
        };
        let m = g.mirrored();
        assert_eq!((m.a, m.b, m.y, m.ty), (n(2), n(1), n(3), GateType::And));
        assert_eq!(m.mirrored(), g);
    }

    #[test]
    fn flip_flop_key_excludes_q() {
        let f1 = FlipFlop {
            d: n(1),
            c: n(2),
            e: n(3),
            q: n(4),
        };
        let f2 = FlipFlop { q: n(5), ..f1 };
        assert_eq!(f1.key(), f2.key());
    }

    #[test]
    fn binary_gate_json_uses_type_field() {
        let g = BinaryGate {
            a: n(1),
            b: n(2),
            y: n(3),
            ty: GateType::Or,
        };
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2,"y":3,"type":"$_OR_"}"#);
    }

    #[test]
    fn wire_refs_cover_all_pins() {
        let f = Entity::from(FlipFlop {
            d: n(1),
            c: n(2),
            e: n(3),
            q: n(4),
        });
        assert_eq!(f.wire_refs(), vec![n(1), n(2), n(3), n(4)]);
        assert_eq!(f.table(), Table::FlipFlop);
    }

    #[test]
    fn render_rows() {
        let s = Entity::from(Selector {
            input: n(10),
            output: n(3),
            left: 0,
            right: 0,
        });
        assert_eq!(s.render(), "(10, 3, 0, 0)");
        assert_eq!(s.render_key(), "(10, 0, 0)");
        let g = Entity::from(UnaryGate {
            a: n(4),
            y: n(2),
            ty: UnaryType::Not,
        });
        assert_eq!(g.render(), "(4, 2, $_NOT_)");
    }

    #[test]
    fn table_names() {
        assert_eq!(Table::FlipFlop.name(), "dffe_pp");
        assert_eq!(Table::ALL.len(), 7);
    }
}
