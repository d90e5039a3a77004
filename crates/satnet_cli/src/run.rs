//! `satnet run`: load, saturate, report.
//!
//! 1. Resolve `satnet.toml` and apply command-line overrides
//! 2. Load and validate the netlist
//! 3. Seed the id allocator from the loaded netlist
//! 4. Run the saturation driver
//! 5. Print requested tables and write the output snapshot

use std::path::Path;

use satnet_config::{ProjectConfig, SaturationMode};
use satnet_diagnostics::DiagnosticSink;
use satnet_ir::{IdAllocator, Snapshot};
use satnet_loader::LoadPolicy;
use satnet_rewrite::{SaturationReport, Saturator};

use crate::pipeline::{format_targets, load_netlist, render_diagnostics, resolve_config};
use crate::{GlobalArgs, RunArgs};

/// Runs the `satnet run` command.
///
/// Returns exit code 0 on success and 1 if the netlist failed to load.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let netlist_path = Path::new(&args.netlist);
    let mut config = resolve_config(global, netlist_path)?;
    apply_overrides(&mut config, args);

    let sink = DiagnosticSink::new();
    let policy = LoadPolicy::from_config(&config.loader);
    let Some((mut store, _)) = load_netlist(netlist_path, policy, global, &sink)? else {
        return Ok(1);
    };

    let saturator = Saturator::from_config(&config)?;
    let mut ids = IdAllocator::seeded_from(&store);

    if !global.quiet {
        let mode = match config.saturate.mode {
            SaturationMode::SinglePass => "single pass".to_string(),
            SaturationMode::Fixpoint => {
                format!("fixpoint, at most {} passes", config.saturate.max_passes)
            }
        };
        eprintln!("  Saturating {} rule(s) ({mode})", saturator.rule_names().len());
    }

    let report = saturator.run(&mut store, &mut ids, &sink);
    render_diagnostics(&sink, global);

    if !global.quiet {
        print_report(&report, global.verbose);
    }

    let printed = format_targets(&store, &args.print);
    if !printed.is_empty() {
        print!("{printed}");
    }

    if let Some(ref output) = args.output {
        let output = Path::new(output);
        Snapshot::capture(&store).write(output)?;
        if !global.quiet {
            eprintln!("     Writing {}", output.display());
        }
    }

    Ok(0)
}

/// Folds `--mode`, `--max-passes` and `--ignore-errors` into the config.
fn apply_overrides(config: &mut ProjectConfig, args: &RunArgs) {
    if let Some(mode) = args.mode {
        config.saturate.mode = mode.into();
    }
    if let Some(max_passes) = args.max_passes {
        config.saturate.max_passes = max_passes.max(1);
    }
    if args.ignore_errors {
        config.loader.ignore_errors = true;
    }
}

fn print_report(report: &SaturationReport, verbose: bool) {
    if verbose {
        for stats in &report.rule_stats {
            eprintln!(
                "              {:<22} fired {}/{}",
                stats.name, stats.fired, stats.invocations
            );
        }
    }
    let before = report.counts_before.total();
    let after = report.counts_after.total();
    let status = if report.reached_fixpoint {
        "fixpoint"
    } else {
        "stopped"
    };
    eprintln!(
        "    Finished {} pass(es), {status}: {before} -> {after} rows",
        report.passes
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModeArg;

    fn args() -> RunArgs {
        RunArgs {
            netlist: "n.json".to_string(),
            mode: None,
            max_passes: None,
            ignore_errors: false,
            print: Vec::new(),
            output: None,
        }
    }

    #[test]
    fn no_overrides_keep_config() {
        let mut config = ProjectConfig::default();
        apply_overrides(&mut config, &args());
        assert_eq!(config.saturate.mode, SaturationMode::Fixpoint);
        assert_eq!(config.saturate.max_passes, 16);
        assert!(!config.loader.ignore_errors);
    }

    #[test]
    fn overrides_applied() {
        let mut config = ProjectConfig::default();
        let mut a = args();
        a.mode = Some(ModeArg::SinglePass);
        a.max_passes = Some(0);
        a.ignore_errors = true;
        apply_overrides(&mut config, &a);
        assert_eq!(config.saturate.mode, SaturationMode::SinglePass);
        assert_eq!(config.saturate.max_passes, 1);
        assert!(config.loader.ignore_errors);
    }

    #[test]
    fn run_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let netlist = dir.path().join("n.json");
        std::fs::write(
            &netlist,
            r#"{"wires": [{"id": 1, "width": 1}, {"id": 2, "width": 1}, {"id": 3, "width": 1}],
                "binary_gates": [{"a": 1, "b": 2, "y": 3, "type": "$_AND_"}]}"#,
        )
        .unwrap();
        let output = dir.path().join("out.bin");
        let mut a = args();
        a.netlist = netlist.to_string_lossy().into_owned();
        a.output = Some(output.to_string_lossy().into_owned());
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };

        assert_eq!(run(&a, &global).unwrap(), 0);
        let store = Snapshot::read(&output).unwrap().into_store();
        assert_eq!(store.counts().binary_gates, 2);
    }

    #[test]
    fn run_fails_on_bad_netlist() {
        let dir = tempfile::tempdir().unwrap();
        let netlist = dir.path().join("n.json");
        std::fs::write(&netlist, r#"{"dffe_pps": [{"d": 1, "c": 2, "e": 3, "q": 4}]}"#).unwrap();
        let mut a = args();
        a.netlist = netlist.to_string_lossy().into_owned();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };
        assert_eq!(run(&a, &global).unwrap(), 1);
    }
}
