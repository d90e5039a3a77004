//! The rewrite rule trait.

use satnet_diagnostics::DiagnosticSink;
use satnet_ir::{IdAllocator, Store};

/// A single structural rewrite over the store.
///
/// A rule first collects every match with the store borrowed immutably,
/// then applies its edits. It returns `true` if any row was inserted or
/// removed, which tells the driver another pass may find new matches.
pub trait RewriteRule {
    /// Short name used in reports, e.g. `group-flip-flops`.
    fn name(&self) -> String;

    /// Runs the rule once over the whole store.
    fn run(&self, store: &mut Store, ids: &mut IdAllocator, sink: &DiagnosticSink) -> bool;
}
