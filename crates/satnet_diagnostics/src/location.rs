//! Record locations that point a diagnostic at a netlist row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the netlist record a diagnostic is about.
///
/// `table` is the entity table name (`wire`, `binary_gate`, `dffe_pp`, ...).
/// `index` is the position of the record in the loader input when known, and
/// `key` is a rendering of the record's uniqueness key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef {
    /// Entity table the record belongs to.
    pub table: String,
    /// Zero-based position in the input section, if the record came from a file.
    pub index: Option<usize>,
    /// Human-readable uniqueness key, e.g. `(1, 2, $_AND_)`.
    pub key: String,
}

impl RecordRef {
    /// Creates a reference to a stored row identified by its key.
    pub fn row(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            index: None,
            key: key.into(),
        }
    }

    /// Creates a reference to the `index`-th record of an input section.
    pub fn input(table: impl Into<String>, index: usize) -> Self {
        Self {
            table: table.into(),
            index: Some(index),
            key: String::new(),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        if !self.key.is_empty() {
            write!(f, " {}", self.key)?;
        }
        Ok(())
    }
}
