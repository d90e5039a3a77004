//! satnet CLI: load a gate-level netlist, saturate it with rewrite rules,
//! and inspect the result.
//!
//! Provides `satnet run` for the full load/saturate/report pipeline,
//! `satnet inspect` for printing tables of a netlist or snapshot, and
//! `satnet check` for loading and validating without rewriting.

#![warn(missing_docs)]

mod check;
mod inspect;
mod pipeline;
mod run;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use satnet_config::SaturationMode;
use satnet_ir::Table;

/// satnet: relational netlist saturation.
#[derive(Parser, Debug)]
#[command(name = "satnet", version, about = "Netlist saturation engine")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print per-rule statistics and other detail.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `satnet.toml` file, or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a netlist, saturate it, and report or save the result.
    Run(RunArgs),
    /// Print tables of a netlist or snapshot without rewriting it.
    Inspect(InspectArgs),
    /// Load and validate a netlist.
    Check(CheckArgs),
}

/// Arguments for the `satnet run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Netlist JSON file.
    pub netlist: String,

    /// Override the saturation mode from `satnet.toml`.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Override the fixpoint pass limit.
    #[arg(long)]
    pub max_passes: Option<u32>,

    /// Drop malformed records with a warning instead of failing.
    #[arg(long)]
    pub ignore_errors: bool,

    /// Tables to print after saturation (repeatable).
    #[arg(long, value_enum)]
    pub print: Vec<PrintTarget>,

    /// Write the saturated netlist to this path (`.bin` for binary, JSON otherwise).
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the `satnet inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Netlist JSON file or snapshot (`.bin` or JSON).
    pub input: String,

    /// Tables to print (repeatable). Prints row counts if nothing is selected.
    #[arg(long, value_enum)]
    pub table: Vec<PrintTarget>,

    /// Print flip-flops joined with their data width.
    #[arg(long)]
    pub dffs: bool,

    /// Print demultiplexer gates.
    #[arg(long)]
    pub demuxes: bool,
}

/// Arguments for the `satnet check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Netlist JSON file.
    pub netlist: String,

    /// Drop malformed records with a warning instead of failing.
    #[arg(long)]
    pub ignore_errors: bool,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Saturation mode selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Run each rule once.
    SinglePass,
    /// Repeat until nothing changes.
    Fixpoint,
}

impl From<ModeArg> for SaturationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::SinglePass => SaturationMode::SinglePass,
            ModeArg::Fixpoint => SaturationMode::Fixpoint,
        }
    }
}

/// A table or report that can be printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrintTarget {
    /// The `wire` table.
    Wire,
    /// The `binary_gate` table.
    BinaryGate,
    /// The `unary_gate` table.
    UnaryGate,
    /// The `dffe_pp` table.
    DffePp,
    /// The `selector` table.
    Selector,
    /// The `concat` table.
    Concat,
    /// The `mux` table.
    Mux,
    /// Flip-flops joined with their data width.
    Dffs,
    /// Demultiplexer gates.
    Demuxes,
}

impl PrintTarget {
    /// The entity table this target prints, if it is a plain table.
    pub fn table(self) -> Option<Table> {
        match self {
            PrintTarget::Wire => Some(Table::Wire),
            PrintTarget::BinaryGate => Some(Table::BinaryGate),
            PrintTarget::UnaryGate => Some(Table::UnaryGate),
            PrintTarget::DffePp => Some(Table::FlipFlop),
            PrintTarget::Selector => Some(Table::Selector),
            PrintTarget::Concat => Some(Table::Concat),
            PrintTarget::Mux => Some(Table::Mux),
            PrintTarget::Dffs | PrintTarget::Demuxes => None,
        }
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from the environment.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => stderr_wants_color(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Inspect(ref args) => inspect::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Colors are on when `TERM` is set to something other than `dumb` and `NO_COLOR` is unset.
fn stderr_wants_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").is_ok_and(|term| term != "dumb")
}
