//! `satnet check`: load and validate a netlist without rewriting it.

use std::path::Path;

use satnet_diagnostics::{DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use satnet_loader::LoadPolicy;

use crate::pipeline::resolve_config;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `satnet check` command.
///
/// Returns exit code 0 if the netlist loads cleanly, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let netlist = Path::new(&args.netlist);
    let config = resolve_config(global, netlist)?;
    let policy = if args.ignore_errors {
        LoadPolicy::IgnoreMalformed
    } else {
        LoadPolicy::from_config(&config.loader)
    };

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("    Checking {}", netlist.display());
    }

    let sink = DiagnosticSink::new();
    let result = satnet_loader::load_netlist(netlist, policy, &sink);
    let diagnostics = sink.take_all();

    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprint!("{}", renderer.render(diag));
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&diagnostics)?;
            println!("{json}");
        }
    }

    let error_count = sink.error_count();
    let warning_count = sink.count(Severity::Warning);

    let ok = match result {
        Ok((store, summary)) => {
            if !global.quiet && args.format == ReportFormat::Text {
                eprintln!(
                    "   Loaded {} row(s) ({} duplicate(s) dropped)",
                    store.counts().total(),
                    summary.duplicates
                );
            }
            true
        }
        Err(e) => {
            if args.format == ReportFormat::Text {
                eprintln!("error: {e}");
            }
            false
        }
    };

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Result: {error_count} error(s), {warning_count} warning(s)");
    }

    Ok(if ok { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str, ignore_errors: bool) -> i32 {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netlist.json");
        std::fs::write(&path, text).unwrap();
        let args = CheckArgs {
            netlist: path.to_string_lossy().into_owned(),
            ignore_errors,
            format: ReportFormat::Text,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };
        run(&args, &global).unwrap()
    }

    #[test]
    fn clean_netlist_passes() {
        assert_eq!(check(r#"{"wires": [{"id": 1, "width": 1}]}"#, false), 0);
    }

    #[test]
    fn malformed_record_fails_fast() {
        assert_eq!(check(r#"{"wires": [{"id": 1}]}"#, false), 1);
    }

    #[test]
    fn malformed_record_ignored_on_request() {
        assert_eq!(check(r#"{"wires": [{"id": 1}]}"#, true), 0);
    }

    #[test]
    fn dangling_reference_fails() {
        assert_eq!(
            check(r#"{"muxes": [{"a": 1, "b": 2, "s": 3, "y": 4}]}"#, true),
            1
        );
    }
}
