//! Tomasulo pipeline simulator CLI.
//!
//! This binary is a batch front end to `tomasim-core`. It performs:
//! 1. **Run:** Load an assembly program, run it to completion and print the
//!    statistics report, or a JSON snapshot of the final architectural state.
//! 2. **Asm:** Assemble a program and print its canonical listing with label
//!    addresses, without simulating it.
//!
//! Logging goes to stderr through `tracing`; set `RUST_LOG` (e.g.
//! `RUST_LOG=tomasim_core=debug`) to see dispatch, commit and squash events.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tomasim_core::config::Config;
use tomasim_core::core::arch::Register;
use tomasim_core::isa::assemble;
use tomasim_core::sim::loader;
use tomasim_core::stats::STATS_SECTIONS;
use tomasim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-level Tomasulo out-of-order pipeline simulator",
    long_about = "Run an assembly program through a Tomasulo pipeline with register renaming, \
reservation stations, a reorder buffer and speculative branches.\n\nExamples:\n  \
tomasim run programs/loop.asm\n  tomasim run programs/loop.asm --json\n  \
tomasim run programs/loop.asm --config big_rob.json --commit-log\n  tomasim asm programs/loop.asm"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion.
    Run {
        /// Assembly source file.
        file: PathBuf,

        /// JSON configuration file (sizes, latencies, general settings).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many cycles (overrides the config).
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print every committed instruction.
        #[arg(long)]
        commit_log: bool,

        /// Print a JSON snapshot instead of the statistics report.
        #[arg(long)]
        json: bool,

        /// Statistics sections to print (default: all).
        #[arg(long, value_delimiter = ',', value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        stats: Vec<String>,
    },

    /// Assemble a program and print its listing.
    Asm {
        /// Assembly source file.
        file: PathBuf,
    },
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
        Commands::Run {
            file,
            config,
            max_cycles,
            commit_log,
            json,
            stats,
        } => cmd_run(&file, config.as_deref(), max_cycles, commit_log, json, &stats),
        Commands::Asm { file } => cmd_asm(&file),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Loads the program, runs it until it drains or hits the cycle limit, and
/// reports. Exits with code 2 when the cycle limit stopped the run.
fn cmd_run(
    file: &Path,
    config: Option<&Path>,
    max_cycles: Option<u64>,
    commit_log: bool,
    json: bool,
    sections: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut config = match config {
        Some(path) => loader::read_config(path)?,
        None => Config::default(),
    };
    if max_cycles.is_some() {
        config.general.max_cycles = max_cycles;
    }
    config.general.commit_log |= commit_log;
    tracing::debug!(?config, "configuration");

    let source = loader::read_program(file)?;
    let mut sim = Simulator::with_config(config);
    sim.load(&source)?;

    if !json {
        println!("[*] Running {} ({} instructions)", file.display(), sim.program().len());
    }
    let _ = sim.run();

    if json {
        let snapshot = sim.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        if commit_log {
            println!();
            for record in sim.commit_log() {
                println!("{record}");
            }
        }
        println!();
        sim.registers().dump();
        print_memory(&sim);
        sim.stats().print_sections(sections)?;
    }

    if let Some(fatal) = sim.fatal() {
        eprintln!("\n[!] {fatal} (pc={}, rsp={})", sim.pc(), sim.registers().read(Register::Rsp));
        process::exit(2);
    }
    Ok(())
}

fn print_memory(sim: &Simulator) {
    if sim.memory().is_empty() {
        return;
    }
    println!("\nMEMORY");
    for (addr, val) in sim.memory().iter() {
        println!("  [{addr:>8}] = {val}");
    }
}

/// Prints the canonical listing of an assembled program.
fn cmd_asm(file: &Path) -> Result<(), Box<dyn Error>> {
    let source = loader::read_program(file)?;
    let program = assemble(&source)?;
    for inst in &program.instructions {
        for (label, _) in program.labels.iter().filter(|(_, a)| **a == inst.address) {
            println!("{label}:");
        }
        println!("  {:>4}  {inst}", inst.address);
    }
    for (label, _) in program
        .labels
        .iter()
        .filter(|(_, a)| **a >= program.len())
    {
        println!("{label}:");
    }
    Ok(())
}
