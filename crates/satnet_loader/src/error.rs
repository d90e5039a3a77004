//! Error types for netlist loading.

use std::path::PathBuf;

use satnet_ir::Violation;

/// Errors that stop a netlist from loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The netlist file could not be read.
    #[error("failed to read netlist {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON or is not a JSON object.
    #[error("invalid netlist document: {reason}")]
    Json {
        /// Description of the problem.
        reason: String,
    },

    /// A record could not be decoded and the policy is fail-fast.
    #[error("malformed record in `{section}`{}: {reason}", index.map(|i| format!("[{i}]")).unwrap_or_default())]
    Malformed {
        /// The input section holding the record.
        section: String,
        /// Position of the record within the section, if the section itself is an array.
        index: Option<usize>,
        /// Why the record was rejected.
        reason: String,
    },

    /// The records decoded, but the resulting netlist breaks structural invariants.
    #[error("netlist has {} structural error(s)", violations.len())]
    InvalidNetlist {
        /// Every violation found.
        violations: Vec<Violation>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display_with_index() {
        let err = LoadError::Malformed {
            section: "wires".into(),
            index: Some(3),
            reason: "missing field `width`".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record in `wires`[3]: missing field `width`"
        );
    }

    #[test]
    fn malformed_display_without_index() {
        let err = LoadError::Malformed {
            section: "muxes".into(),
            index: None,
            reason: "section must be an array".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record in `muxes`: section must be an array"
        );
    }

    #[test]
    fn invalid_netlist_display_counts() {
        let err = LoadError::InvalidNetlist { violations: vec![] };
        assert_eq!(err.to_string(), "netlist has 0 structural error(s)");
    }
}
