//! Gate type tags for binary and unary gates.
//!
//! Tags serialize with the Yosys internal cell names (`$_AND_`, `$_NOT_`, ...)
//! used by the netlist loader input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The function computed by a two-input gate row.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum GateType {
    /// `y = a & b`.
    #[serde(rename = "$_AND_")]
    And,
    /// `y = a | b`.
    #[serde(rename = "$_OR_")]
    Or,
    /// `y = a ^ b`.
    #[serde(rename = "$_XOR_")]
    Xor,
    /// `y = !(a & b)`.
    #[serde(rename = "$_NAND_")]
    Nand,
    /// `y = !(a | b)`.
    #[serde(rename = "$_NOR_")]
    Nor,
    /// `y = !(a ^ b)`.
    #[serde(rename = "$_XNOR_")]
    Xnor,
    /// `y = a & !b`.
    #[serde(rename = "$_ANDNOT_")]
    AndNot,
    /// `y = a | !b`.
    #[serde(rename = "$_ORNOT_")]
    OrNot,
    /// 1-to-2 demultiplexer: `y[0] = a & !b`, `y[1] = a & b`; `y` is 2 bits wide.
    #[serde(rename = "$_DEMUX_")]
    Demux,
}

impl GateType {
    /// All binary gate types, in declaration order.
    pub const ALL: [GateType; 9] = [
        GateType::And,
        GateType::Or,
        GateType::Xor,
        GateType::Nand,
        GateType::Nor,
        GateType::Xnor,
        GateType::AndNot,
        GateType::OrNot,
        GateType::Demux,
    ];

    /// Returns the cell name used in netlists, e.g. `$_AND_`.
    pub fn cell_name(self) -> &'static str {
        match self {
            GateType::And => "$_AND_",
            GateType::Or => "$_OR_",
            GateType::Xor => "$_XOR_",
            GateType::Nand => "$_NAND_",
            GateType::Nor => "$_NOR_",
            GateType::Xnor => "$_XNOR_",
            GateType::AndNot => "$_ANDNOT_",
            GateType::OrNot => "$_ORNOT_",
            GateType::Demux => "$_DEMUX_",
        }
    }

    /// Returns `true` if swapping `a` and `b` yields the same function.
    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            GateType::And
                | GateType::Or
                | GateType::Xor
                | GateType::Nand
                | GateType::Nor
                | GateType::Xnor
        )
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cell_name())
    }
}

impl FromStr for GateType {
    type Err = UnknownGateType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateType::ALL
            .into_iter()
            .find(|t| t.cell_name() == s)
            .ok_or_else(|| UnknownGateType(s.to_string()))
    }
}

/// The function computed by a one-input gate row.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum UnaryType {
    /// `y = !a`.
    #[serde(rename = "$_NOT_")]
    Not,
    /// `y = a`.
    #[serde(rename = "$_BUF_")]
    Buf,
}

impl UnaryType {
    /// Returns the cell name used in netlists, e.g. `$_NOT_`.
    pub fn cell_name(self) -> &'static str {
        match self {
            UnaryType::Not => "$_NOT_",
            UnaryType::Buf => "$_BUF_",
        }
    }
}

impl fmt::Display for UnaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cell_name())
    }
}

impl FromStr for UnaryType {
    type Err = UnknownGateType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$_NOT_" => Ok(UnaryType::Not),
            "$_BUF_" => Ok(UnaryType::Buf),
            _ => Err(UnknownGateType(s.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized gate cell name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gate type '{0}'")]
pub struct UnknownGateType(pub String);
