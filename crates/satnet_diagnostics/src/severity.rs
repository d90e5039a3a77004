//! How serious a diagnostic is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic. Declaration order is the severity order.
///
/// Errors reject the netlist (or, for E901, a single rewrite); warnings
/// describe input that was skipped or a saturation that stopped early.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Extra context attached to a run.
    Note,
    /// Something was skipped or left incomplete.
    Warning,
    /// The netlist or a rewrite was rejected.
    Error,
}

impl Severity {
    /// The lowercase label used in rendered headers and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Whether `--quiet` still prints diagnostics of this severity.
    pub fn shown_when_quiet(self) -> bool {
        self == Severity::Error
    }

    /// ANSI escape used to highlight the rendered header.
    pub(crate) fn ansi_color(self) -> &'static str {
        match self {
            Severity::Note => "\x1b[1;36m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Error => "\x1b[1;31m",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
