//! JSON netlist loading for satnet.
//!
//! [`load_netlist`] reads a JSON document with the optional sections
//! `wires`, `binary_gates`, `unary_gates`, `dffe_pps`, `muxes`, `selectors`
//! and `concats`, inserts every record into a fresh [`satnet_ir::Store`],
//! and validates the result. Malformed records are handled according to a
//! [`LoadPolicy`].

#![warn(missing_docs)]

pub mod error;
pub mod netlist;
pub mod policy;
pub mod report;

pub use error::LoadError;
pub use netlist::{load_netlist, load_netlist_from_str};
pub use policy::{LoadPolicy, LoadSummary};
pub use report::violation_diagnostic;
