//! Rewrite rules for the satnet netlist IR and the driver that saturates a
//! store with them.
//!
//! Three rules are provided:
//! 1. [`GroupFlipFlops`] merges flip-flops sharing clock and enable
//! 2. [`CommutativeRule`] adds the input-swapped twin of every gate of a commutative type
//! 3. [`SynthesizeDemuxes`] recognizes `{a & !s, a & s}` as a demultiplexer
//!
//! [`Saturator`] runs them in that order, once or until nothing changes.
//!
//! # Usage
//!
//! ```ignore
//! use satnet_rewrite::Saturator;
//! let saturator = Saturator::from_config(&config)?;
//! let mut ids = IdAllocator::seeded_from(&store);
//! let report = saturator.run(&mut store, &mut ids, &sink);
//! ```

#![warn(missing_docs)]

pub mod commutative;
pub mod demux;
pub mod dff_group;
pub mod rule;
pub mod saturate;

pub use commutative::CommutativeRule;
pub use demux::SynthesizeDemuxes;
pub use dff_group::GroupFlipFlops;
pub use rule::RewriteRule;
pub use saturate::{RuleStats, SaturationReport, Saturator};
