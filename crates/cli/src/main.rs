//! Peripheral simulator CLI.
//!
//! This binary provides a single entry point for driving the peripheral model. It performs:
//! 1. **Check:** Run the canonical scenarios and report pass/fail with statistics.
//! 2. **Run:** Free-run the core in one mode for a number of edges, optionally writing a trace.
//! 3. **List:** Print the available scenarios.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ttsim_core::config::Config;
use ttsim_core::core::{CoreState, Mode};
use ttsim_core::sim::{JsonLinesTrace, Scenario, ScenarioReport, Simulator};
use ttsim_core::stats::SimStats;
use ttsim_core::{PinOutputs, Result};

#[derive(Parser, Debug)]
#[command(
    name = "ttsim",
    author,
    version,
    about = "Cycle-accurate loopback/counter peripheral simulator",
    long_about = "Run the canonical verification scenarios or free-run the peripheral core.\n\nExamples:\n  ttsim check\n  ttsim check counter --json\n  ttsim run --mode counter --cycles 300 --trace counter.jsonl\n  ttsim run --mode loopback --uio-in 0x2a --cycles 4"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file; built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results and statistics as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Raise the log level (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run verification scenarios (all of them when none are named).
    Check {
        /// Scenario names, e.g. `loopback`, `loopback-reset-shift`, `counter`.
        scenarios: Vec<String>,
    },

    /// Free-run the core in one mode and print the final outputs.
    Run {
        /// Operating mode selected through `ui_in[0]`.
        #[arg(short, long, value_parser = parse_mode, default_value = "loopback")]
        mode: Mode,

        /// Rising edges to generate after reset is released.
        #[arg(short = 'n', long, default_value_t = 16)]
        cycles: u64,

        /// Value driven on `uio_in` (decimal, or hex with a `0x` prefix).
        #[arg(long, value_parser = parse_byte, default_value = "0")]
        uio_in: u8,

        /// Edges to hold reset for first; defaults to `driver.reset_cycles`.
        #[arg(long)]
        reset_cycles: Option<u64>,

        /// Write one JSON record per edge to this file.
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// List available scenarios.
    List,
}

/// Result of `ttsim check` in `--json` mode.
#[derive(Serialize)]
struct CheckSummary<'a> {
    passed: bool,
    reports: &'a [ScenarioReport],
    error: Option<String>,
    stats: &'a SimStats,
}

/// Result of `ttsim run` in `--json` mode.
#[derive(Serialize)]
struct RunSummary<'a> {
    cycle: u64,
    state: CoreState,
    outputs: PinOutputs,
    stats: &'a SimStats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the `fmt` subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Check { scenarios } => cmd_check(&config, scenarios, cli.json),
        Commands::Run {
            mode,
            cycles,
            uio_in,
            reset_cycles,
            trace,
        } => cmd_run(
            &config,
            *mode,
            *cycles,
            *uio_in,
            reset_cycles.unwrap_or(config.driver.reset_cycles),
            trace.as_deref(),
            cli.json,
        ),
        Commands::List => {
            for scenario in Scenario::ALL {
                println!("{:<22} {}", scenario.name(), scenario.description());
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    path.map_or_else(
        || Ok(Config::default()),
        |path| {
            info!(path = %path.display(), "loading configuration");
            Config::from_file(path)
        },
    )
}

/// Runs each scenario on its own freshly powered-on core and stops at the first failure.
fn cmd_check(config: &Config, names: &[String], json: bool) -> Result<()> {
    let scenarios = if names.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        names
            .iter()
            .map(|name| Scenario::from_name(name))
            .collect::<Result<Vec<_>>>()?
    };

    let mut stats = SimStats::default();
    let mut reports = Vec::with_capacity(scenarios.len());
    let mut failure = None;

    for scenario in scenarios {
        let mut sim = Simulator::with_config(config);
        let outcome = scenario.run(&mut sim, config);
        stats.merge(sim.stats());
        match outcome {
            Ok(report) => {
                if !json {
                    println!(
                        "PASS  {:<22} {:>6} cycles {:>6} checks",
                        report.scenario.name(),
                        report.cycles,
                        report.checks
                    );
                }
                reports.push(report);
            }
            Err(e) => {
                if !json {
                    println!("FAIL  {:<22} {e}", scenario.name());
                }
                failure = Some(e);
                break;
            }
        }
    }

    if json {
        let summary = CheckSummary {
            passed: failure.is_none(),
            reports: &reports,
            error: failure.as_ref().map(ToString::to_string),
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        stats.print();
    }

    failure.map_or(Ok(()), Err)
}

/// Resets the core in `mode`, then free-runs it with `uio_in` held constant.
fn cmd_run(
    config: &Config,
    mode: Mode,
    cycles: u64,
    uio_in: u8,
    reset_cycles: u64,
    trace: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut sim = Simulator::with_config(config);
    if let Some(path) = trace {
        info!(path = %path.display(), "writing trace");
        sim = sim.with_trace_sink(Box::new(JsonLinesTrace::create(path)?));
    }

    sim.set_ui_in(mode.ui_in());
    sim.set_uio_in(uio_in);
    sim.apply_reset(reset_cycles)?;
    sim.clock_cycles(cycles)?;
    sim.flush_trace()?;

    let outputs = sim.outputs();
    if json {
        let summary = RunSummary {
            cycle: sim.cycle(),
            state: sim.state(),
            outputs,
            stats: sim.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("cycle     {}", sim.cycle());
        println!("state     {}", sim.state());
        println!("uo_out    {:#04x} ({:#010b})", outputs.uo_out, outputs.uo_out);
        println!("uio_out   {:#04x} ({:#010b})", outputs.uio_out, outputs.uio_out);
        println!("uio_oe    {:#04x}", outputs.uio_oe);
        sim.stats().print_sections(&["summary".to_owned()]);
    }
    Ok(())
}

/// Parses a mode name for clap.
fn parse_mode(s: &str) -> std::result::Result<Mode, String> {
    Mode::from_name(s).ok_or_else(|| format!("unknown mode `{s}` (expected loopback or counter)"))
}

/// Parses a byte given in decimal or `0x`-prefixed hex.
fn parse_byte(s: &str) -> std::result::Result<u8, String> {
    let parsed = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .map_or_else(|| s.parse::<u8>(), |hex| u8::from_str_radix(hex, 16));
    parsed.map_err(|e| format!("invalid byte `{s}`: {e}"))
}
