//! The relational netlist IR used by satnet.
//!
//! This crate defines the entity rows ([`Wire`], [`BinaryGate`],
//! [`UnaryGate`], [`FlipFlop`], [`Selector`], [`Concat`], [`Mux`]), the
//! indexed [`Store`] that holds them with insert-if-absent semantics,
//! [`ChangeSet`] for applying a structural edit in one step, the
//! [`IdAllocator`] for synthesized wires, structural validation, read-only
//! inspection, and [`Snapshot`] persistence.

#![warn(missing_docs)]

pub mod alloc;
pub mod changeset;
pub mod entity;
pub mod error;
pub mod inspect;
pub mod snapshot;
pub mod store;
pub mod validate;

pub use alloc::IdAllocator;
pub use changeset::{ApplyOutcome, ChangeSet};
pub use entity::{
    BinaryGate, BinaryKey, Concat, ConcatKey, Entity, FlipFlop, FlipFlopKey, Mux, Selector,
    SelectorKey, Table, UnaryGate, UnaryKey, Wire,
};
pub use error::SnapshotError;
pub use inspect::{flip_flop_report, FlipFlopRow};
pub use snapshot::Snapshot;
pub use store::{Store, StoreCounts};
pub use validate::{validate, Violation};
