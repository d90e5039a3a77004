//! `satnet inspect`: print tables of a netlist or snapshot.

use std::path::Path;

use satnet_diagnostics::DiagnosticSink;
use satnet_ir::{Store, Table};
use satnet_loader::LoadPolicy;

use crate::pipeline::{format_targets, load_any, resolve_config};
use crate::{GlobalArgs, InspectArgs, PrintTarget};

/// Runs the `satnet inspect` command.
pub fn run(args: &InspectArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let input = Path::new(&args.input);
    let config = resolve_config(global, input)?;
    let sink = DiagnosticSink::new();
    let policy = LoadPolicy::from_config(&config.loader);
    let Some(store) = load_any(input, policy, global, &sink)? else {
        return Ok(1);
    };

    let mut targets = args.table.clone();
    if args.dffs {
        targets.push(PrintTarget::Dffs);
    }
    if args.demuxes {
        targets.push(PrintTarget::Demuxes);
    }

    if targets.is_empty() {
        print!("{}", format_counts(&store));
    } else {
        print!("{}", format_targets(&store, &targets));
    }
    Ok(0)
}

/// One `<table>: <rows>` line per table.
fn format_counts(store: &Store) -> String {
    let counts = store.counts();
    Table::ALL
        .iter()
        .map(|table| {
            let rows = match table {
                Table::Wire => counts.wires,
                Table::BinaryGate => counts.binary_gates,
                Table::UnaryGate => counts.unary_gates,
                Table::FlipFlop => counts.flip_flops,
                Table::Selector => counts.selectors,
                Table::Concat => counts.concats,
                Table::Mux => counts.muxes,
            };
            format!("{:<12} {rows}\n", format!("{table}:"))
        })
        .collect()
}
