//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps `run`, `inspect` and `check` have in common:
//! configuration lookup, netlist or snapshot loading, diagnostic rendering,
//! and table printing.

use std::path::{Path, PathBuf};

use satnet_config::ProjectConfig;
use satnet_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use satnet_ir::inspect::{format_demuxes, format_flip_flops, format_table};
use satnet_ir::{Snapshot, Store};
use satnet_loader::{LoadPolicy, LoadSummary};

use crate::{GlobalArgs, PrintTarget};

/// Resolves the configuration for a netlist at `input`.
///
/// `--config` may name a file or a directory holding `satnet.toml`. Without
/// it, `satnet.toml` is looked up next to the input file; a missing file
/// yields the defaults.
pub fn resolve_config(
    global: &GlobalArgs,
    input: &Path,
) -> Result<ProjectConfig, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_dir() {
            return Ok(satnet_config::load_config(&p)?);
        }
        if !p.is_file() {
            return Err(format!("configuration file {} does not exist", p.display()).into());
        }
        return Ok(satnet_config::load_config_file(&p)?);
    }
    let dir = input
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok(satnet_config::load_config(dir)?)
}

/// Loads a netlist JSON file, rendering diagnostics as they come.
///
/// Returns `Ok(None)` after reporting the failure if the netlist could not
/// be loaded; the caller should exit with status 1.
pub fn load_netlist(
    path: &Path,
    policy: LoadPolicy,
    global: &GlobalArgs,
    sink: &DiagnosticSink,
) -> Result<Option<(Store, LoadSummary)>, Box<dyn std::error::Error>> {
    if !global.quiet {
        eprintln!("     Loading {}", path.display());
    }
    let result = satnet_loader::load_netlist(path, policy, sink);
    render_diagnostics(sink, global);
    match result {
        Ok((store, summary)) => {
            if global.verbose {
                eprintln!(
                    "              {} row(s) inserted, {} duplicate(s), {} malformed",
                    summary.inserted, summary.duplicates, summary.malformed
                );
            }
            Ok(Some((store, summary)))
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(None)
        }
    }
}

/// Loads either a snapshot (`.bin`, or JSON with snapshot shape) or a netlist.
///
/// Binary snapshots are decoded directly; JSON input goes through the
/// netlist loader so that it is validated.
pub fn load_any(
    path: &Path,
    policy: LoadPolicy,
    global: &GlobalArgs,
    sink: &DiagnosticSink,
) -> Result<Option<Store>, Box<dyn std::error::Error>> {
    if satnet_ir::snapshot::is_binary_path(path) {
        if !global.quiet {
            eprintln!("     Reading {}", path.display());
        }
        let snapshot = Snapshot::read(path)?;
        return Ok(Some(snapshot.into_store()));
    }
    Ok(load_netlist(path, policy, global, sink)?.map(|(store, _)| store))
}

/// Drains the sink and prints every diagnostic to stderr.
///
/// Warnings are hidden under `--quiet`; errors are always shown.
pub fn render_diagnostics(sink: &DiagnosticSink, global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in sink.take_all() {
        if global.quiet && !diag.severity.shown_when_quiet() {
            continue;
        }
        eprint!("{}", renderer.render(&diag));
    }
}

/// Renders the requested tables and reports.
pub fn format_targets(store: &Store, targets: &[PrintTarget]) -> String {
    let mut out = String::new();
    for &target in targets {
        let section = match (target, target.table()) {
            (_, Some(table)) => format_table(store, table),
            (PrintTarget::Dffs, None) => format_flip_flops(store),
            (_, None) => format_demuxes(store),
        };
        out.push_str(&section);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use satnet_common::NodeId;
    use satnet_ir::{FlipFlop, Wire};

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
        }
    }

    #[test]
    fn config_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("netlist.json");
        let config = resolve_config(&global(None), &input).unwrap();
        assert_eq!(config.saturate.max_passes, 16);
    }

    #[test]
    fn config_found_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("satnet.toml"), "[saturate]\nmax_passes = 3\n").unwrap();
        let input = dir.path().join("netlist.json");
        let config = resolve_config(&global(None), &input).unwrap();
        assert_eq!(config.saturate.max_passes, 3);
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[loader]\nignore_errors = true\n").unwrap();
        let config = resolve_config(
            &global(Some(path.to_string_lossy().into_owned())),
            Path::new("netlist.json"),
        )
        .unwrap();
        assert!(config.loader.ignore_errors);
    }

    #[test]
    fn explicit_config_missing_is_error() {
        let result = resolve_config(
            &global(Some("/nonexistent/satnet.toml".to_string())),
            Path::new("netlist.json"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn failed_load_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"wires": [{"id": 1, "width": 0}]}"#).unwrap();
        let sink = DiagnosticSink::new();
        let loaded = load_netlist(&path, LoadPolicy::FailFast, &global(None), &sink).unwrap();
        assert!(loaded.is_none());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn load_any_reads_binary_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ir.bin");
        let mut store = Store::new();
        store.insert_wire(Wire {
            id: NodeId::from_raw(4),
            width: 2,
        });
        Snapshot::capture(&store).write(&path).unwrap();

        let sink = DiagnosticSink::new();
        let loaded = load_any(&path, LoadPolicy::FailFast, &global(None), &sink)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.wire_width(NodeId::from_raw(4)), Some(2));
    }

    #[test]
    fn format_targets_in_order() {
        let mut store = Store::new();
        for id in 1..=4 {
            store.insert_wire(Wire {
                id: NodeId::from_raw(id),
                width: 1,
            });
        }
        store.insert_flip_flop(FlipFlop {
            d: NodeId::from_raw(1),
            c: NodeId::from_raw(2),
            e: NodeId::from_raw(3),
            q: NodeId::from_raw(4),
        });
        let out = format_targets(&store, &[PrintTarget::Dffs, PrintTarget::DffePp]);
        assert_eq!(out, "DFFs:\n(1, 2, 3, 4, 1)\nTable dffe_pp:\n(1, 2, 3, 4)\n");
    }
}
