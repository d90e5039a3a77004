//! Collects the diagnostics raised while loading, validating and rewriting.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared collector handed to the loader and to every rewrite rule.
///
/// Per-severity tallies outlive [`take_all`](Self::take_all): the CLI drains
/// the queue to render it and still decides its exit status afterwards.
pub struct DiagnosticSink {
    state: Mutex<SinkState>,
}

#[derive(Default)]
struct SinkState {
    pending: Vec<Diagnostic>,
    tally: [usize; 3],
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a diagnostic and counts it under its severity.
    pub fn emit(&self, diag: Diagnostic) {
        let mut state = self.state();
        state.tally[diag.severity.slot()] += 1;
        state.pending.push(diag);
    }

    /// Number of diagnostics of `severity` emitted so far, drained or not.
    pub fn count(&self, severity: Severity) -> usize {
        self.state().tally[severity.slot()]
    }

    /// Number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Whether any error was emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Removes and returns the queued diagnostics in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.state().pending)
    }

    /// Copies the queued diagnostics without draining them.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.state().pending.clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
