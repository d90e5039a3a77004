//! Conformance test helpers for satnet.
//!
//! Provides shared pipeline functions that push a JSON netlist through the
//! full pipeline (load → validate → saturate) and return structured results
//! for assertion in integration tests.

#![warn(missing_docs)]

use satnet_config::ProjectConfig;
use satnet_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use satnet_ir::{IdAllocator, Store};
use satnet_loader::{LoadError, LoadPolicy, LoadSummary};
use satnet_rewrite::{SaturationReport, Saturator};

/// Result of running the full load → saturate pipeline.
pub struct PipelineResult {
    /// The store after saturation, or as loaded if loading failed partway.
    pub store: Store,
    /// Load counts, if the netlist loaded.
    pub summary: Option<LoadSummary>,
    /// The saturation report, if the netlist loaded.
    pub report: Option<SaturationReport>,
    /// The load error, if the netlist did not load.
    pub load_error: Option<LoadError>,
    /// The allocator after saturation, for checking id freshness.
    pub ids: Option<IdAllocator>,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

/// Parses a `satnet.toml` body into a validated config.
pub fn make_config(toml_str: &str) -> ProjectConfig {
    satnet_config::load_config_from_str(toml_str).unwrap()
}

/// Runs the full pipeline on a JSON netlist with the default config.
pub fn full_pipeline(json: &str) -> PipelineResult {
    full_pipeline_with(json, &ProjectConfig::default())
}

/// Runs the full pipeline on a JSON netlist with an explicit config.
pub fn full_pipeline_with(json: &str, config: &ProjectConfig) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let policy = LoadPolicy::from_config(&config.loader);
    let (store, summary, report, load_error, ids) =
        match satnet_loader::load_netlist_from_str(json, policy, &sink) {
            Ok((mut store, summary)) => {
                let saturator = Saturator::from_config(config).unwrap();
                let mut ids = IdAllocator::seeded_from(&store);
                let report = saturator.run(&mut store, &mut ids, &sink);
                (store, Some(summary), Some(report), None, Some(ids))
            }
            Err(e) => (Store::new(), None, None, Some(e), None),
        };

    let diagnostics = sink.take_all();
    let error_count = sink.error_count();
    let warning_count = sink.count(Severity::Warning);
    PipelineResult {
        store,
        summary,
        report,
        load_error,
        ids,
        has_errors: error_count > 0,
        error_count,
        warning_count,
        diagnostics,
    }
}

/// Runs the pipeline and panics if the netlist fails to load.
pub fn saturate_ok(json: &str) -> PipelineResult {
    let result = full_pipeline(json);
    if let Some(ref e) = result.load_error {
        panic!("netlist failed to load: {e}");
    }
    result
}

/// Builds `count` one-bit wire records with ids `1..=count`.
pub fn wires(count: u64) -> Vec<serde_json::Value> {
    (1..=count)
        .map(|id| serde_json::json!({"id": id, "width": 1}))
        .collect()
}
