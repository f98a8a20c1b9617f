//! MIPS pipeline simulator CLI.
//!
//! This binary provides the entry point for both simulation modes. It performs:
//! 1. **Cycle run:** Loads a program and cache configuration, runs the
//!    cycle-accurate pipeline model, and writes the `_cycle` artifacts.
//! 2. **Functional run:** Executes the program without timing and writes the
//!    `_funct` register and memory artifacts.
//!
//! Logging goes to stderr through `tracing`; set `RUST_LOG` (default `warn`).

use std::path::{Path, PathBuf};
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pipesim_core::config::Config;
use pipesim_core::sim::{RunStatus, Simulator, run_functional};
use pipesim_core::stats::STATS_SECTIONS;
use pipesim_core::SimError;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate five-stage MIPS pipeline simulator",
    long_about = "Run a big-endian MIPS program image through the pipeline timing model or the functional executor.\n\nExamples:\n  pipesim cycle tests/fib.bin cache_config.txt\n  pipesim cycle tests/fib.bin cache_config.txt --max-cycles 200 --no-trace\n  pipesim cycle tests/fib.bin --config sim.json --stats stalls\n  pipesim funct tests/fib.bin --mem-range 0x0 0x200"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cycle-accurate run with caches and the pipeline trace.
    Cycle(CycleArgs),

    /// Functional run without timing.
    Funct {
        /// Program image loaded at address 0.
        program: PathBuf,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Memory dump range as hex START END (end exclusive).
        #[arg(long, num_args = 2, value_names = ["START", "END"], value_parser = parse_hex)]
        mem_range: Option<Vec<u32>>,

        /// Give up after this many instructions (0 runs until halt).
        #[arg(long, default_value_t = 0)]
        max_instructions: u64,
    },
}

/// Arguments of the `cycle` subcommand.
#[derive(Args, Debug)]
struct CycleArgs {
    /// Program image loaded at address 0.
    program: PathBuf,

    /// Plain-text cache configuration (I-cache then D-cache: size, block, ways, latency).
    /// Without it the `cache` section of `--config` (or the defaults) is used.
    cache_config: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many cycles (0 runs until halt).
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Do not write the per-cycle pipeline trace.
    #[arg(long)]
    no_trace: bool,

    /// Memory dump range as hex START END (end exclusive).
    #[arg(long, num_args = 2, value_names = ["START", "END"], value_parser = parse_hex)]
    mem_range: Option<Vec<u32>>,

    /// Print the statistics as JSON instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Print only these statistics sections (repeatable).
    #[arg(
        long = "stats",
        value_name = "SECTION",
        value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
    )]
    stats: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Cycle(args) => cmd_cycle(&args),
        Commands::Funct {
            program,
            config,
            mem_range,
            max_instructions,
        } => cmd_funct(&program, config.as_deref(), mem_range.as_deref(), max_instructions),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Loads the JSON configuration (or defaults) and applies a `--mem-range` override.
fn load_config(path: Option<&Path>, mem_range: Option<&[u32]>) -> Result<Config, SimError> {
    let mut config = match path {
        Some(p) => Config::from_json_file(p)?,
        None => Config::default(),
    };
    if let Some(&[start, end]) = mem_range {
        config.memory.dump_start = start;
        config.memory.dump_end = end;
    }
    Ok(config)
}

/// Runs the cycle-accurate model and writes every artifact.
///
/// Artifacts are written whether the run halted or hit the cycle bound.
fn cmd_cycle(args: &CycleArgs) -> Result<(), SimError> {
    let mut config = load_config(args.config.as_deref(), args.mem_range.as_deref())?;
    if args.no_trace {
        config.general.trace_pipeline = false;
    }
    if let Some(n) = args.max_cycles {
        config.general.max_cycles = n;
    }
    let caches = config.cache_hierarchy(args.cache_config.as_deref())?;

    let mut sim = Simulator::from_program(&args.program, &caches, &config)?;
    let status = sim.run(config.general.max_cycles);
    sim.finalize(config.memory.dump_start, config.memory.dump_end);
    let status = status?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim.stats)?);
    } else {
        match status {
            RunStatus::Halt => println!("[*] Halted after {} cycles", sim.stats.cycles),
            RunStatus::Success => println!("[*] Stopped at the cycle bound ({})", sim.stats.cycles),
        }
        sim.stats.print_sections(&args.stats);
    }
    Ok(())
}

/// Runs the functional executor to halt and writes the `_funct` artifacts.
fn cmd_funct(
    program: &Path,
    config_path: Option<&Path>,
    mem_range: Option<&[u32]>,
    max_instructions: u64,
) -> Result<(), SimError> {
    let config = load_config(config_path, mem_range)?;
    let cpu = run_functional(program, &config, max_instructions)?;
    println!("[*] Halted after {} instructions", cpu.instructions());
    Ok(())
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex address '{s}': {e}"))
}
