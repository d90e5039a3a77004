//! Decoding of the JSON netlist document into a [`Store`].
//!
//! Each section is an array of records. Records are decoded one at a time
//! from [`serde_json::Value`] so that a single bad record is reported on its
//! own and, under [`LoadPolicy::IgnoreMalformed`], dropped without losing
//! the rest of its section.

use std::path::Path;

use satnet_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, RecordRef};
use satnet_ir::{
    validate, BinaryGate, Concat, Entity, FlipFlop, Mux, Selector, Store, UnaryGate, Wire,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::policy::{LoadPolicy, LoadSummary};
use crate::report::violation_diagnostic;

/// Reads and loads the netlist at `path`.
pub fn load_netlist(
    path: &Path,
    policy: LoadPolicy,
    sink: &DiagnosticSink,
) -> Result<(Store, LoadSummary), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_netlist_from_str(&text, policy, sink)
}

/// Loads a netlist from a JSON string.
///
/// Every section is optional. Records whose key already exists are counted
/// as duplicates and dropped. After all sections are inserted the store is
/// validated; any violation is emitted as an error diagnostic and fails the
/// load with [`LoadError::InvalidNetlist`].
pub fn load_netlist_from_str(
    text: &str,
    policy: LoadPolicy,
    sink: &DiagnosticSink,
) -> Result<(Store, LoadSummary), LoadError> {
    let document: Value = serde_json::from_str(text).map_err(|e| LoadError::Json {
        reason: e.to_string(),
    })?;
    let Value::Object(sections) = document else {
        return Err(LoadError::Json {
            reason: "top-level value must be an object".to_string(),
        });
    };

    let mut loader = SectionLoader {
        sections: &sections,
        store: Store::new(),
        summary: LoadSummary::default(),
        policy,
        sink,
    };
    loader.load::<Wire>("wires")?;
    loader.load::<BinaryGate>("binary_gates")?;
    loader.load::<UnaryGate>("unary_gates")?;
    loader.load::<FlipFlop>("dffe_pps")?;
    loader.load::<Mux>("muxes")?;
    loader.load::<Selector>("selectors")?;
    loader.load::<Concat>("concats")?;
    let SectionLoader { store, summary, .. } = loader;

    let violations = validate(&store);
    if !violations.is_empty() {
        for violation in &violations {
            sink.emit(violation_diagnostic(violation));
        }
        return Err(LoadError::InvalidNetlist { violations });
    }

    Ok((store, summary))
}

struct SectionLoader<'a> {
    sections: &'a Map<String, Value>,
    store: Store,
    summary: LoadSummary,
    policy: LoadPolicy,
    sink: &'a DiagnosticSink,
}

impl SectionLoader<'_> {
    fn load<T>(&mut self, section: &str) -> Result<(), LoadError>
    where
        T: DeserializeOwned + Into<Entity>,
    {
        let records = match self.sections.get(section) {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Array(records)) => records,
            Some(_) => {
                return self.malformed(section, None, "section must be an array".to_string());
            }
        };

        for (index, record) in records.iter().enumerate() {
            match T::deserialize(record) {
                Ok(row) => {
                    if self.store.insert(row.into()) {
                        self.summary.inserted += 1;
                    } else {
                        self.summary.duplicates += 1;
                    }
                }
                Err(e) => self.malformed(section, Some(index), e.to_string())?,
            }
        }
        Ok(())
    }

    fn malformed(
        &mut self,
        section: &str,
        index: Option<usize>,
        reason: String,
    ) -> Result<(), LoadError> {
        let location = match index {
            Some(i) => RecordRef::input(section, i),
            None => RecordRef::row(section, ""),
        };
        match self.policy {
            LoadPolicy::FailFast => {
                self.sink.emit(
                    Diagnostic::error(DiagnosticCode::MALFORMED_RECORD, reason.clone())
                        .at(location)
                        .with_help("rerun with --ignore-errors to skip malformed records"),
                );
                Err(LoadError::Malformed {
                    section: section.to_string(),
                    index,
                    reason,
                })
            }
            LoadPolicy::IgnoreMalformed => {
                self.sink.emit(
                    Diagnostic::warning(DiagnosticCode::MALFORMED_RECORD_IGNORED, reason)
                        .at(location)
                        .with_note("record dropped"),
                );
                self.summary.malformed += 1;
                Ok(())
            }
        }
    }
}
