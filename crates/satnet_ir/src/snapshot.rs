//! Persisted images of a store.
//!
//! A [`Snapshot`] lists every row of every table using the same record shapes
//! as the netlist loader input, so a JSON snapshot can be fed straight back
//! into the loader. The binary form is a bincode payload behind a small
//! header carrying magic bytes, a format version, and an XXH3 checksum.

use std::path::Path;

use satnet_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::entity::{BinaryGate, Concat, FlipFlop, Mux, Selector, UnaryGate, Wire};
use crate::error::SnapshotError;
use crate::store::Store;

/// Magic bytes identifying a binary satnet snapshot.
const SNAPSHOT_MAGIC: [u8; 4] = *b"SNET";

/// Current binary snapshot format version.
const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Header prepended to every binary snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotHeader {
    magic: [u8; 4],
    format_version: u32,
    satnet_version: String,
    checksum: ContentHash,
}

/// Every row of a store, grouped by table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Wire rows.
    #[serde(default)]
    pub wires: Vec<Wire>,
    /// Binary gate rows.
    #[serde(default)]
    pub binary_gates: Vec<BinaryGate>,
    /// Unary gate rows.
    #[serde(default)]
    pub unary_gates: Vec<UnaryGate>,
    /// Flip-flop rows.
    #[serde(default)]
    pub dffe_pps: Vec<FlipFlop>,
    /// Mux rows.
    #[serde(default)]
    pub muxes: Vec<Mux>,
    /// Selector rows.
    #[serde(default)]
    pub selectors: Vec<Selector>,
    /// Concat rows.
    #[serde(default)]
    pub concats: Vec<Concat>,
}

impl Snapshot {
    /// Copies every row out of the store, in key order.
    pub fn capture(store: &Store) -> Self {
        Self {
            wires: store.wires().copied().collect(),
            binary_gates: store.binary_gates().copied().collect(),
            unary_gates: store.unary_gates().copied().collect(),
            dffe_pps: store.flip_flops().copied().collect(),
            muxes: store.muxes().copied().collect(),
            selectors: store.selectors().copied().collect(),
            concats: store.concats().copied().collect(),
        }
    }

    /// Rebuilds a store from the snapshot. Duplicate keys are dropped.
    pub fn into_store(self) -> Store {
        let mut store = Store::new();
        store.insert_all(self.wires);
        store.insert_all(self.binary_gates);
        store.insert_all(self.unary_gates);
        store.insert_all(self.dffe_pps);
        store.insert_all(self.muxes);
        store.insert_all(self.selectors);
        store.insert_all(self.concats);
        store
    }

    /// Encodes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Json {
            reason: e.to_string(),
        })
    }

    /// Decodes a snapshot from JSON.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(text).map_err(|e| SnapshotError::Json {
            reason: e.to_string(),
        })
    }

    /// Encodes the snapshot as header + bincode payload.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        let payload = bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| SnapshotError::Serialization {
                reason: e.to_string(),
            })?;

        let header = SnapshotHeader {
            magic: SNAPSHOT_MAGIC,
            format_version: SNAPSHOT_FORMAT_VERSION,
            satnet_version: env!("CARGO_PKG_VERSION").to_string(),
            checksum: ContentHash::from_bytes(&payload),
        };
        let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
            .map_err(|e| SnapshotError::Serialization {
                reason: e.to_string(),
            })?;

        // 4-byte header length (little-endian) + header + payload
        let header_len = header_bytes.len() as u32;
        let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
        output.extend_from_slice(&header_len.to_le_bytes());
        output.extend_from_slice(&header_bytes);
        output.extend_from_slice(&payload);
        Ok(output)
    }

    /// Decodes a snapshot produced by [`to_binary`](Self::to_binary), validating the header.
    pub fn from_binary(raw: &[u8]) -> Result<Self, SnapshotError> {
        let len_bytes: [u8; 4] = raw
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| SnapshotError::InvalidHeader {
                reason: "file shorter than header length prefix".to_string(),
            })?;
        let header_len = u32::from_le_bytes(len_bytes) as usize;
        let header_raw =
            raw.get(4..4 + header_len)
                .ok_or_else(|| SnapshotError::InvalidHeader {
                    reason: "truncated header".to_string(),
                })?;

        let (header, _): (SnapshotHeader, usize) =
            bincode::serde::decode_from_slice(header_raw, bincode::config::standard()).map_err(
                |e| SnapshotError::InvalidHeader {
                    reason: e.to_string(),
                },
            )?;

        if header.magic != SNAPSHOT_MAGIC {
            return Err(SnapshotError::InvalidHeader {
                reason: "bad magic bytes".to_string(),
            });
        }
        if header.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_FORMAT_VERSION,
                actual: header.format_version,
            });
        }

        let payload = &raw[4 + header_len..];
        let actual = ContentHash::from_bytes(payload);
        if actual != header.checksum {
            return Err(SnapshotError::ChecksumMismatch {
                expected: header.checksum.to_string(),
                actual: actual.to_string(),
            });
        }

        let (snapshot, _) = bincode::serde::decode_from_slice(payload, bincode::config::standard())
            .map_err(|e| SnapshotError::Serialization {
                reason: e.to_string(),
            })?;
        Ok(snapshot)
    }

    /// Writes the snapshot to `path`; the `.bin` extension selects the binary form, anything else JSON.
    pub fn write(&self, path: &Path) -> Result<(), SnapshotError> {
        let bytes = if is_binary_path(path) {
            self.to_binary()?
        } else {
            self.to_json()?.into_bytes()
        };
        std::fs::write(path, bytes).map_err(|e| SnapshotError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Reads a snapshot from `path`, choosing the form by extension like [`write`](Self::write).
    pub fn read(path: &Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read(path).map_err(|e| SnapshotError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if is_binary_path(path) {
            Self::from_binary(&raw)
        } else {
            let text = String::from_utf8(raw).map_err(|e| SnapshotError::Json {
                reason: e.to_string(),
            })?;
            Self::from_json(&text)
        }
    }
}

/// Returns `true` if `path` names a binary snapshot (`.bin`).
pub fn is_binary_path(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("bin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use satnet_common::{GateType, NodeId, UnaryType};

    fn n(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    fn sample_store() -> Store {
        let mut store = Store::new();
        for id in 1..=5 {
            store.insert_wire(Wire { id: n(id), width: 1 });
        }
        store.insert_wire(Wire { id: n(6), width: 2 });
        store.insert_unary_gate(UnaryGate {
            a: n(4),
            y: n(2),
            ty: UnaryType::Not,
        });
        store.insert_binary_gate(BinaryGate {
            a: n(1),
            b: n(2),
            y: n(3),
            ty: GateType::And,
        });
        store.insert_selector(Selector {
            input: n(6),
            output: n(3),
            left: 0,
            right: 0,
        });
        store
    }

    #[test]
    fn capture_and_rebuild() {
        let store = sample_store();
        let rebuilt = Snapshot::capture(&store).into_store();
        assert_eq!(rebuilt.fingerprint(), store.fingerprint());
        assert_eq!(rebuilt.max_id(), store.max_id());
    }

    #[test]
    fn json_matches_loader_shape() {
        let json = Snapshot::capture(&sample_store()).to_json().unwrap();
        assert!(json.contains("\"dffe_pps\""));
        assert!(json.contains("\"type\": \"$_NOT_\""));
        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back.unary_gates.len(), 1);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot = Snapshot::from_json(r#"{"wires": [{"id": 1, "width": 3}]}"#).unwrap();
        assert_eq!(snapshot.wires.len(), 1);
        assert!(snapshot.dffe_pps.is_empty());
    }

    #[test]
    fn binary_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ir.bin");
        let snapshot = Snapshot::capture(&sample_store());
        snapshot.write(&path).unwrap();
        assert_eq!(Snapshot::read(&path).unwrap(), snapshot);
    }

    #[test]
    fn json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ir.json");
        let snapshot = Snapshot::capture(&sample_store());
        snapshot.write(&path).unwrap();
        assert_eq!(Snapshot::read(&path).unwrap(), snapshot);
    }

    #[test]
    fn corrupted_payload_rejected() {
        let mut bytes = Snapshot::capture(&sample_store()).to_binary().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        let err = Snapshot::from_binary(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::ChecksumMismatch { .. }));
    }

    #[test]
    fn truncated_file_rejected() {
        let err = Snapshot::from_binary(&[1, 0]).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidHeader { .. }));
        let err = Snapshot::from_binary(&[200, 0, 0, 0, 1, 2]).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidHeader { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Snapshot::read(Path::new("/nonexistent/ir.bin")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
