//! Converts structural violations into diagnostics.

use satnet_diagnostics::{Diagnostic, DiagnosticCode, RecordRef};
use satnet_ir::Violation;

/// Builds the error diagnostic reported for `violation`.
pub fn violation_diagnostic(violation: &Violation) -> Diagnostic {
    let entity = violation.entity();
    let location = RecordRef::row(entity.table().name(), entity.render_key());
    let diag = match violation {
        Violation::DanglingWireReference { wire, .. } => {
            Diagnostic::error(DiagnosticCode::DANGLING_WIRE, violation.to_string())
                .with_help(format!("declare wire {wire} in the `wires` section"))
        }
        Violation::ZeroWidthWire { .. } => {
            Diagnostic::error(DiagnosticCode::ZERO_WIDTH_WIRE, violation.to_string())
                .with_note("wires must be at least one bit wide")
        }
        Violation::RangeOutOfBounds { .. } => {
            Diagnostic::error(DiagnosticCode::RANGE_OUT_OF_BOUNDS, violation.to_string())
        }
        Violation::InvertedRange { .. } => {
            Diagnostic::error(DiagnosticCode::INVERTED_RANGE, violation.to_string())
                .with_note("bit ranges are written as [left, right] with left <= right")
        }
    };
    diag.at(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use satnet_common::{GateType, NodeId};
    use satnet_diagnostics::Severity;
    use satnet_ir::{BinaryGate, Entity};

    #[test]
    fn dangling_reference_maps_to_e101() {
        let gate = BinaryGate {
            a: NodeId::from_raw(1),
            b: NodeId::from_raw(2),
            y: NodeId::from_raw(3),
            ty: GateType::Or,
        };
        let violation = Violation::DanglingWireReference {
            entity: Entity::BinaryGate(gate),
            wire: NodeId::from_raw(2),
        };
        let diag = violation_diagnostic(&violation);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, DiagnosticCode::DANGLING_WIRE);
        let location = diag.location.unwrap();
        assert_eq!(location.table, "binary_gate");
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn zero_width_maps_to_e102() {
        let violation = Violation::ZeroWidthWire {
            wire: NodeId::from_raw(9),
        };
        let diag = violation_diagnostic(&violation);
        assert_eq!(diag.code, DiagnosticCode::ZERO_WIDTH_WIRE);
        assert_eq!(diag.message, "wire 9 has width 0");
    }
}
