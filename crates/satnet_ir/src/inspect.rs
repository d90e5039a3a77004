//! Read-only inspection of store tables.

use crate::entity::{Entity, Table};
use crate::store::Store;
use satnet_common::{GateType, NodeId};
use std::fmt::Write;

/// A flip-flop joined with the width of its data input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FlipFlopRow {
    /// Data input.
    pub d: NodeId,
    /// Clock.
    pub c: NodeId,
    /// Enable.
    pub e: NodeId,
    /// Output.
    pub q: NodeId,
    /// Width of wire `d`.
    pub width: u32,
}

/// Every row of `table`, in key order.
pub fn rows(store: &Store, table: Table) -> Vec<Entity> {
    match table {
        Table::Wire => store.wires().map(|&r| r.into()).collect(),
        Table::BinaryGate => store.binary_gates().map(|&r| r.into()).collect(),
        Table::UnaryGate => store.unary_gates().map(|&r| r.into()).collect(),
        Table::FlipFlop => store.flip_flops().map(|&r| r.into()).collect(),
        Table::Selector => store.selectors().map(|&r| r.into()).collect(),
        Table::Concat => store.concats().map(|&r| r.into()).collect(),
        Table::Mux => store.muxes().map(|&r| r.into()).collect(),
    }
}

/// Joins every flip-flop with the width of its `d` wire.
///
/// Flip-flops whose `d` wire is undeclared are left out, as an inner join would.
pub fn flip_flop_report(store: &Store) -> Vec<FlipFlopRow> {
    store
        .flip_flops()
        .filter_map(|ff| {
            let width = store.wire_width(ff.d)?;
            Some(FlipFlopRow {
                d: ff.d,
                c: ff.c,
                e: ff.e,
                q: ff.q,
                width,
            })
        })
        .collect()
}

/// Renders a table as `Table <name>:` followed by one tuple per row.
pub fn format_table(store: &Store, table: Table) -> String {
    let mut out = format!("Table {table}:\n");
    for row in rows(store, table) {
        let _ = writeln!(out, "{}", row.render());
    }
    out
}

/// Renders the flip-flop/width join as `DFFs:` followed by `(d, c, e, q, width)` tuples.
pub fn format_flip_flops(store: &Store) -> String {
    let mut out = String::from("DFFs:\n");
    for row in flip_flop_report(store) {
        let _ = writeln!(
            out,
            "({}, {}, {}, {}, {})",
            row.d, row.c, row.e, row.q, row.width
        );
    }
    out
}

/// Renders every `$_DEMUX_` gate as `Demuxes:` followed by one tuple per gate.
pub fn format_demuxes(store: &Store) -> String {
    let mut out = String::from("Demuxes:\n");
    for gate in store.binary_gates_by_type(GateType::Demux) {
        let _ = writeln!(out, "{}", Entity::from(*gate).render());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BinaryGate, FlipFlop, Wire};

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn sample() -> Store {
        let mut store = Store::new();
        for (id, width) in [(1, 8), (2, 1), (3, 1), (4, 8)] {
            store.insert_wire(Wire { id: n(id), width });
        }
        store.insert_flip_flop(FlipFlop {
            d: n(1),
            c: n(2),
            e: n(3),
            q: n(4),
        });
        // d = 50 is undeclared and drops out of the join.
        store.insert_flip_flop(FlipFlop {
            d: n(50),
            c: n(2),
            e: n(3),
            q: n(51),
        });
        store.insert_binary_gate(BinaryGate {
            a: n(2),
            b: n(3),
            y: n(60),
            ty: GateType::Demux,
        });
        store
    }

    #[test]
    fn rows_per_table() {
        let store = sample();
        assert_eq!(rows(&store, Table::Wire).len(), 4);
        assert_eq!(rows(&store, Table::FlipFlop).len(), 2);
        assert!(rows(&store, Table::Mux).is_empty());
    }

    #[test]
    fn flip_flop_join_uses_d_width() {
        let report = flip_flop_report(&sample());
        assert_eq!(
            report,
            vec![FlipFlopRow {
                d: n(1),
                c: n(2),
                e: n(3),
                q: n(4),
                width: 8
            }]
        );
    }

    #[test]
    fn formats() {
        let store = sample();
        assert_eq!(
            format_table(&store, Table::Wire),
            "Table wire:\n(1, 8)\n(2, 1)\n(3, 1)\n(4, 8)\n"
        );
        assert_eq!(format_flip_flops(&store), "DFFs:\n(1, 2, 3, 4, 8)\n");
        assert_eq!(format_demuxes(&store), "Demuxes:\n(2, 3, 60, $_DEMUX_)\n");
        assert_eq!(format_table(&Store::new(), Table::Mux), "Table mux:\n");
    }
}
