//! Shared foundational types used across the satnet workspace.
//!
//! This crate provides the netlist node identifier, gate type tags, content
//! hashing for IR fingerprints, and the internal error type.

#![warn(missing_docs)]

pub mod gate;
pub mod hash;
pub mod id;
pub mod result;

pub use gate::{GateType, UnaryType, UnknownGateType};
pub use hash::{ContentHash, ContentHasher};
pub use id::NodeId;
pub use result::{InternalError, SatnetResult};
