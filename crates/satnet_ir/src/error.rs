//! Error types for snapshot persistence.

use std::path::PathBuf;

/// Errors that can occur while writing or reading a store snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// An I/O error occurred while reading or writing the snapshot file.
    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The JSON snapshot could not be encoded or decoded.
    #[error("invalid JSON snapshot: {reason}")]
    Json {
        /// Description of the failure.
        reason: String,
    },

    /// The binary payload could not be encoded or decoded.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },

    /// The binary snapshot has a missing or malformed header.
    #[error("invalid snapshot header: {reason}")]
    InvalidHeader {
        /// Description of the header problem.
        reason: String,
    },

    /// The binary snapshot was written by an incompatible format version.
    #[error("snapshot format version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The version this build reads.
        expected: u32,
        /// The version found in the file.
        actual: u32,
    },

    /// The payload checksum does not match the header.
    #[error("snapshot checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The checksum recorded in the header.
        expected: String,
        /// The checksum of the payload actually read.
        actual: String,
    },
}
