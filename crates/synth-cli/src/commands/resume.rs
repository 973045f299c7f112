//! `synth resume` — continue a synthesis run from a checkpoint without the
//! caller repeating the original target/gate set.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console::style;

use synth_dispatch::RayonDispatcher;
use synth_gateset::{GateSet, QubitGateSet};
use synth_search::{Beams, SynthesisOptions};

use crate::run_meta::RunMeta;
use crate::target;

pub struct ResumeArgs {
    pub statefile: PathBuf,
    pub timeout: Option<u64>,
}

fn resolve_gateset(name: &str) -> Result<Arc<dyn GateSet>> {
    match name {
        "qubit" => Ok(Arc::new(QubitGateSet)),
        other => anyhow::bail!("unknown gate set '{other}' (known: qubit)"),
    }
}

pub fn execute(args: ResumeArgs) -> Result<()> {
    let meta = RunMeta::load(&args.statefile)?;
    let matrix = target::load(&meta.target_path)?;
    let gateset = resolve_gateset(&meta.gateset)?;

    println!(
        "{} resuming from {}",
        style("→").cyan().bold(),
        args.statefile.display()
    );

    let mut options = SynthesisOptions::for_target(matrix);
    options.gateset = gateset;
    options.dispatcher = Arc::new(RayonDispatcher::new(meta.num_tasks));
    options.num_tasks = meta.num_tasks;
    options.depth = meta.depth;
    options.threshold = meta.threshold;
    options.beams = Beams::Auto;
    options.timeout = args.timeout.map(Duration::from_secs);
    options.statefile = Some(args.statefile);

    let output = synth_search::synthesize(&options)?;
    crate::commands::print_result(&output)?;
    Ok(())
}
