//! Merges flip-flops that share a clock and enable into one wide flip-flop.
//!
//! Every member's data input is packed into a fresh wide wire through a
//! concat, and every member's output is recovered from a second wide wire
//! through a selector. Members are laid out in `(d, q)` order starting at
//! bit 0, so the same netlist always produces the same layout.

use satnet_common::{InternalError, NodeId, SatnetResult};
use satnet_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, RecordRef};
use satnet_ir::{ChangeSet, Concat, FlipFlop, IdAllocator, Selector, Store, Table, Wire};

use crate::rule::RewriteRule;

/// The flip-flop grouping rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupFlipFlops;

/// One group found in the read phase.
struct GroupPlan {
    c: NodeId,
    e: NodeId,
    /// Members with the width of their data wire, sorted by `(d, q)`.
    members: Vec<(FlipFlop, u32)>,
    total_width: u32,
}

impl RewriteRule for GroupFlipFlops {
    fn name(&self) -> String {
        "group-flip-flops".to_string()
    }

    fn run(&self, store: &mut Store, ids: &mut IdAllocator, sink: &DiagnosticSink) -> bool {
        let mut plans = Vec::new();
        for (c, e) in store.flip_flop_groups() {
            match plan_group(store, c, e) {
                Ok(plan) => plans.push(plan),
                Err(err) => sink.emit(
                    Diagnostic::error(DiagnosticCode::INTERNAL, err.to_string())
                        .at(group_ref(c, e))
                        .with_note("flip-flop group left unchanged"),
                ),
            }
        }

        let mut changed = false;
        for plan in plans {
            let (c, e) = (plan.c, plan.e);
            match plan.into_changes(ids) {
                Some(changes) => changed |= store.apply(changes).changed(),
                None => sink.emit(
                    Diagnostic::error(DiagnosticCode::INTERNAL, "node id space exhausted")
                        .at(group_ref(c, e))
                        .with_note("flip-flop group left unchanged"),
                ),
            }
        }
        changed
    }
}

fn group_ref(c: NodeId, e: NodeId) -> RecordRef {
    RecordRef::row(Table::FlipFlop.name(), format!("(_, {c}, {e})"))
}

fn plan_group(store: &Store, c: NodeId, e: NodeId) -> SatnetResult<GroupPlan> {
    let mut members = Vec::new();
    for ff in store.flip_flops_by_clock_enable(c, e) {
        let width = store
            .wire_width(ff.d)
            .filter(|w| *w > 0)
            .ok_or_else(|| {
                InternalError::new(format!("flip-flop data input {} has no usable wire", ff.d))
            })?;
        members.push((*ff, width));
    }
    members.sort_by_key(|(ff, _)| (ff.d, ff.q));

    let total_width = members
        .iter()
        .try_fold(0u32, |acc, (_, width)| acc.checked_add(*width))
        .ok_or_else(|| {
            InternalError::new(format!("combined width of flip-flop group ({c}, {e}) overflows"))
        })?;

    Ok(GroupPlan {
        c,
        e,
        members,
        total_width,
    })
}

impl GroupPlan {
    /// Returns `None` when the allocator cannot supply the two wide wires.
    fn into_changes(self, ids: &mut IdAllocator) -> Option<ChangeSet> {
        let concat_output = ids.next()?;
        let selector_input = ids.next()?;
        let mut changes = ChangeSet::new();

        let mut offset = 0;
        for (ff, width) in &self.members {
            changes.remove_flip_flop(ff.key());
            let left = offset;
            let right = offset + width - 1;
            changes.insert(Concat {
                input: ff.d,
                output: concat_output,
                left,
                right,
            });
            changes.insert(Selector {
                input: selector_input,
                output: ff.q,
                left,
                right,
            });
            offset += width;
        }

        changes.insert(Wire {
            id: concat_output,
            width: self.total_width,
        });
        changes.insert(Wire {
            id: selector_input,
            width: self.total_width,
        });
        changes.insert(FlipFlop {
            d: concat_output,
            c: self.c,
            e: self.e,
            q: selector_input,
        });
        Some(changes)
    }
}
