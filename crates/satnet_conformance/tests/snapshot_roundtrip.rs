//! Saving saturated stores and reading them back.

use satnet_conformance::{saturate_ok, wires};
use satnet_ir::{Snapshot, SnapshotError};
use serde_json::json;

fn saturated() -> satnet_conformance::PipelineResult {
    let netlist = json!({
        "wires": wires(8),
        "unary_gates": [{"a": 4, "y": 2, "type": "$_NOT_"}],
        "binary_gates": [
            {"a": 1, "b": 2, "y": 3, "type": "$_AND_"},
            {"a": 1, "b": 4, "y": 5, "type": "$_AND_"}
        ],
        "dffe_pps": [
            {"d": 3, "c": 6, "e": 7, "q": 8},
            {"d": 5, "c": 6, "e": 7, "q": 2}
        ],
        "muxes": [{"a": 1, "b": 2, "s": 3, "y": 4}]
    });
    saturate_ok(&netlist.to_string())
}

#[test]
fn binary_snapshot_preserves_every_row() {
    let result = saturated();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saturated.bin");
    Snapshot::capture(&result.store).write(&path).unwrap();

    let restored = Snapshot::read(&path).unwrap().into_store();
    assert_eq!(restored.fingerprint(), result.store.fingerprint());
    assert_eq!(restored.counts(), result.store.counts());
}

#[test]
fn json_snapshot_reloads_through_loader() {
    let result = saturated();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saturated.json");
    Snapshot::capture(&result.store).write(&path).unwrap();

    let sink = satnet_diagnostics::DiagnosticSink::new();
    let (store, summary) =
        satnet_loader::load_netlist(&path, satnet_loader::LoadPolicy::FailFast, &sink).unwrap();
    assert_eq!(store.fingerprint(), result.store.fingerprint());
    assert_eq!(summary.duplicates, 0);
}

#[test]
fn truncated_binary_snapshot_is_rejected() {
    let result = saturated();
    let bytes = Snapshot::capture(&result.store).to_binary().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.bin");
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let err = Snapshot::read(&path).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::ChecksumMismatch { .. } | SnapshotError::InvalidHeader { .. }
    ));
}
