//! `synth run` — synthesize a circuit for a target unitary loaded from disk.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use console::style;

use synth_dispatch::RayonDispatcher;
use synth_gateset::{GateSet, QubitGateSet};
use synth_search::{Beams, SynthesisOptions};

use crate::run_meta::RunMeta;
use crate::target;

/// Arguments accepted by `synth run`, mirroring §6's synthesis entry point.
pub struct RunArgs {
    pub target: PathBuf,
    pub gateset: String,
    pub depth: Option<usize>,
    pub threshold: f64,
    pub beams: Option<usize>,
    pub num_tasks: Option<usize>,
    pub timeout: Option<u64>,
    pub statefile: Option<PathBuf>,
}

fn resolve_gateset(name: &str) -> Result<Arc<dyn GateSet>> {
    match name {
        "qubit" => Ok(Arc::new(QubitGateSet)),
        other => bail!("unknown gate set '{other}' (known: qubit)"),
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let matrix = target::load(&args.target)?;
    let gateset = resolve_gateset(&args.gateset)?;
    let num_tasks = args
        .num_tasks
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));

    let mut options = SynthesisOptions::for_target(matrix);
    options.gateset = gateset;
    options.dispatcher = Arc::new(RayonDispatcher::new(num_tasks));
    options.num_tasks = num_tasks;
    options.depth = args.depth;
    options.threshold = args.threshold;
    options.beams = args.beams.map(Beams::Fixed).unwrap_or(Beams::Auto);
    options.timeout = args.timeout.map(Duration::from_secs);
    options.statefile = args.statefile.clone();

    if let Some(statefile) = &args.statefile {
        RunMeta {
            target_path: args.target.clone(),
            gateset: args.gateset.clone(),
            depth: args.depth,
            threshold: args.threshold,
            num_tasks,
        }
        .save(statefile)?;
    }

    println!(
        "{} synthesizing against {} ({} gate set, threshold {:.1e})",
        style("→").cyan().bold(),
        args.target.display(),
        args.gateset,
        args.threshold
    );

    let output = synth_search::synthesize(&options)?;
    crate::commands::print_result(&output)?;

    if output.best_distance < options.threshold {
        if let Some(statefile) = &args.statefile {
            let store = synth_checkpoint::JsonCheckpointStore::new(statefile.clone());
            if let Err(e) = synth_checkpoint::CheckpointStore::<synth_search::CheckpointBlob>::delete(&store) {
                tracing::warn!(error = %e, "failed to clean up checkpoint after success");
            }
        }
    }

    Ok(())
}
