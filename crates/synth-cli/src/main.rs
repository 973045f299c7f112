//! `synth` — command-line interface to the quantum-circuit synthesizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod run_meta;
mod target;

use commands::{resume, run};

/// Quantum-circuit synthesizer: find a parameterized gate sequence
/// approximating a target unitary.
#[derive(Parser)]
#[command(name = "synth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a circuit for a target unitary.
    Run {
        /// Path to a JSON file holding the target unitary as rows of `[re, im]` pairs.
        #[arg(short, long)]
        target: PathBuf,

        /// Gate-set catalog to draw layers from.
        #[arg(short, long, default_value = "qubit")]
        gateset: String,

        /// Maximum search depth (unbounded if omitted).
        #[arg(long)]
        depth: Option<usize>,

        /// Residual below which the search stops.
        #[arg(long, default_value = "0.01")]
        threshold: f64,

        /// Frontier entries expanded per cycle (auto-sized if omitted).
        #[arg(long)]
        beams: Option<usize>,

        /// Worker pool size (defaults to available parallelism).
        #[arg(long)]
        num_tasks: Option<usize>,

        /// Wall-clock budget in seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Checkpoint file to write progress to and resume from.
        #[arg(long)]
        statefile: Option<PathBuf>,
    },

    /// Resume a synthesis run from a checkpoint.
    Resume {
        /// Checkpoint file produced by a prior `run --statefile`.
        #[arg(long)]
        statefile: PathBuf,

        /// Wall-clock budget in seconds for the resumed run.
        #[arg(long)]
        timeout: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run {
            target,
            gateset,
            depth,
            threshold,
            beams,
            num_tasks,
            timeout,
            statefile,
        } => run::execute(run::RunArgs {
            target,
            gateset,
            depth,
            threshold,
            beams,
            num_tasks,
            timeout,
            statefile,
        }),
        Commands::Resume { statefile, timeout } => {
            resume::execute(resume::ResumeArgs { statefile, timeout })
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
