//! XXH3-128 digests of store contents and snapshot payloads.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::{xxh3_128, Xxh3};

/// A 128-bit XXH3 digest.
///
/// Saturation compares store fingerprints to detect a pass that changed
/// nothing; binary snapshots carry one over their payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Digest of a complete byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxh3_128(data))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:08x}..)", self.0 >> 96)
    }
}

/// Incremental digest over row fields, fed in a fixed little-endian layout.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Starts an empty digest.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds a one-byte discriminant.
    pub fn tag(&mut self, tag: u8) -> &mut Self {
        self.state.update(&[tag]);
        self
    }

    /// Feeds a node id.
    pub fn id(&mut self, id: NodeId) -> &mut Self {
        self.state.update(&id.as_raw().to_le_bytes());
        self
    }

    /// Feeds a width or bit offset.
    pub fn number(&mut self, value: u32) -> &mut Self {
        self.state.update(&value.to_le_bytes());
        self
    }

    /// Digest of everything fed so far.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}
