//! Recognizes `{a & !s, a & s}` gate pairs as 1-to-2 demultiplexers.
//!
//! A match is two AND gates sharing input `a`, where the second input of the
//! first gate is the inverse of the second input of the other. Each match
//! becomes a `$_DEMUX_` gate keyed by `(a, s)` whose 2-bit output drives the
//! two original AND outputs through selectors.

use satnet_common::{GateType, NodeId, UnaryType};
use satnet_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, RecordRef};
use satnet_ir::{BinaryGate, ChangeSet, IdAllocator, Selector, Store, Table, Wire};

use crate::rule::RewriteRule;

/// The demultiplexer synthesis rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthesizeDemuxes;

/// `AND(a, b1) -> y1`, `AND(a, b2) -> y2`, `NOT(b2) -> b1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct DemuxMatch {
    pub(crate) a: NodeId,
    pub(crate) b1: NodeId,
    pub(crate) y1: NodeId,
    pub(crate) b2: NodeId,
    pub(crate) y2: NodeId,
}

/// Collects every demux pattern in the store, sorted.
pub(crate) fn find_matches(store: &Store) -> Vec<DemuxMatch> {
    let mut matches = Vec::new();
    for not in store.unary_gates_by_type(UnaryType::Not) {
        let (b2, b1) = (not.a, not.y);
        for inverted in store.binary_gates_with_b(b1, GateType::And) {
            if let Some(direct) = store.binary_gate(inverted.a, b2, GateType::And) {
                matches.push(DemuxMatch {
                    a: inverted.a,
                    b1,
                    y1: inverted.y,
                    b2,
                    y2: direct.y,
                });
            }
        }
    }
    matches.sort();
    matches.dedup();
    matches
}

impl RewriteRule for SynthesizeDemuxes {
    fn name(&self) -> String {
        "synthesize-demuxes".to_string()
    }

    fn run(&self, store: &mut Store, ids: &mut IdAllocator, sink: &DiagnosticSink) -> bool {
        let matches = find_matches(store);

        let mut changed = false;
        for m in matches {
            if store.binary_gate(m.a, m.b2, GateType::Demux).is_some() {
                continue;
            }
            let Some(output) = ids.next() else {
                sink.emit(
                    Diagnostic::error(DiagnosticCode::INTERNAL, "node id space exhausted")
                        .at(RecordRef::row(
                            Table::BinaryGate.name(),
                            format!("({}, {}, _, {})", m.a, m.b2, GateType::Demux),
                        ))
                        .with_note("demultiplexer not synthesized"),
                );
                continue;
            };
            let mut changes = ChangeSet::new();
            changes.insert(BinaryGate {
                a: m.a,
                b: m.b2,
                y: output,
                ty: GateType::Demux,
            });
            changes.insert(Wire {
                id: output,
                width: 2,
            });
            changes.insert(Selector {
                input: output,
                output: m.y1,
                left: 0,
                right: 0,
            });
            changes.insert(Selector {
                input: output,
                output: m.y2,
                left: 1,
                right: 1,
            });
            changed |= store.apply(changes).changed();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satnet_ir::{validate, UnaryGate};

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn and(a: u64, b: u64, y: u64) -> BinaryGate {
        BinaryGate {
            a: n(a),
            b: n(b),
            y: n(y),
            ty: GateType::And,
        }
    }

    /// Wires 1..=5, `NOT(4) -> 2`, `AND(1, 2) -> 3`, `AND(1, 4) -> 5`.
    fn demux_store() -> Store {
        let mut store = Store::new();
        for id in 1..=5 {
            store.insert_wire(Wire { id: n(id), width: 1 });
        }
        store.insert_unary_gate(UnaryGate {
            a: n(4),
            y: n(2),
            ty: UnaryType::Not,
        });
        store.insert_binary_gate(and(1, 2, 3));
        store.insert_binary_gate(and(1, 4, 5));
        store
    }

    #[test]
    fn finds_the_pattern() {
        let matches = find_matches(&demux_store());
        assert_eq!(
            matches,
            vec![DemuxMatch {
                a: n(1),
                b1: n(2),
                y1: n(3),
                b2: n(4),
                y2: n(5),
            }]
        );
    }

    #[test]
    fn synthesizes_demux_with_selectors() {
        let mut store = demux_store();
        let mut ids = IdAllocator::seeded_from(&store);
        assert!(SynthesizeDemuxes.run(&mut store, &mut ids, &DiagnosticSink::new()));

        let demux = store.binary_gate(n(1), n(4), GateType::Demux).unwrap();
        assert_eq!(demux.y, n(6));
        assert_eq!(store.wire_width(n(6)), Some(2));
        assert_eq!(store.selector(n(6), 0, 0).unwrap().output, n(3));
        assert_eq!(store.selector(n(6), 1, 1).unwrap().output, n(5));
        assert_eq!(store.counts().selectors, 2);
        assert!(validate(&store).is_empty());
    }

    #[test]
    fn rerun_adds_nothing() {
        let mut store = demux_store();
        let mut ids = IdAllocator::seeded_from(&store);
        let sink = DiagnosticSink::new();
        SynthesizeDemuxes.run(&mut store, &mut ids, &sink);
        let counts = store.counts();
        let next = ids.peek();

        assert!(!SynthesizeDemuxes.run(&mut store, &mut ids, &sink));
        assert_eq!(store.counts(), counts);
        assert_eq!(ids.peek(), next);
    }

    #[test]
    fn existing_demux_consumes_no_id() {
        let mut store = demux_store();
        store.insert_binary_gate(BinaryGate {
            a: n(1),
            b: n(4),
            y: n(5),
            ty: GateType::Demux,
        });
        let mut ids = IdAllocator::seeded_from(&store);
        assert!(!SynthesizeDemuxes.run(&mut store, &mut ids, &DiagnosticSink::new()));
        assert_eq!(ids.peek(), Some(n(6)));
        assert_eq!(store.counts().wires, 5);
    }

    #[test]
    fn needs_the_inverter() {
        let mut store = Store::new();
        for id in 1..=5 {
            store.insert_wire(Wire { id: n(id), width: 1 });
        }
        store.insert_binary_gate(and(1, 2, 3));
        store.insert_binary_gate(and(1, 4, 5));
        assert!(find_matches(&store).is_empty());
    }

    #[test]
    fn inputs_must_share_a() {
        let mut store = Store::new();
        for id in 1..=5 {
            store.insert_wire(Wire { id: n(id), width: 1 });
        }
        store.insert_unary_gate(UnaryGate {
            a: n(4),
            y: n(2),
            ty: UnaryType::Not,
        });
        store.insert_binary_gate(and(1, 2, 3));
        store.insert_binary_gate(and(3, 4, 5));
        let mut ids = IdAllocator::seeded_from(&store);
        assert!(!SynthesizeDemuxes.run(&mut store, &mut ids, &DiagnosticSink::new()));
    }

    #[test]
    fn exhausted_ids_skip_the_match() {
        let mut store = demux_store();
        store.insert_wire(Wire {
            id: n(u64::MAX),
            width: 1,
        });
        let before = store.fingerprint();
        let mut ids = IdAllocator::seeded_from(&store);
        let sink = DiagnosticSink::new();

        assert!(!SynthesizeDemuxes.run(&mut store, &mut ids, &sink));
        assert_eq!(store.fingerprint(), before);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::INTERNAL);
    }
}
