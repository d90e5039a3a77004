//! Closes a commutative gate type under input swapping.

use satnet_common::GateType;
use satnet_diagnostics::DiagnosticSink;
use satnet_ir::{BinaryGate, IdAllocator, Store};

use crate::rule::RewriteRule;

/// For every gate `(a, b, y, ty)` inserts the mirrored gate `(b, a, y, ty)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommutativeRule {
    ty: GateType,
}

impl CommutativeRule {
    /// Creates the rule for `ty`, or `None` if `ty` is not commutative.
    pub fn new(ty: GateType) -> Option<Self> {
        ty.is_commutative().then_some(Self { ty })
    }

    /// The gate type this rule symmetrizes.
    pub fn gate_type(&self) -> GateType {
        self.ty
    }
}

impl RewriteRule for CommutativeRule {
    fn name(&self) -> String {
        format!("commutative {}", self.ty)
    }

    fn run(&self, store: &mut Store, _ids: &mut IdAllocator, _sink: &DiagnosticSink) -> bool {
        let mirrored: Vec<BinaryGate> = store
            .binary_gates_by_type(self.ty)
            .filter(|g| store.binary_gate(g.b, g.a, self.ty).is_none())
            .map(BinaryGate::mirrored)
            .collect();
        store.insert_all(mirrored) > 0
    }
}
