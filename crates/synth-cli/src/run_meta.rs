//! The sidecar file `synth resume` reads to reconstruct a run's target and
//! gate set without the caller having to repeat `--target`/`--gateset`.
//!
//! This is deliberately separate from [`synth_search::CheckpointBlob`]: the
//! core checkpoint blob's shape is fixed by §6 of the spec (frontier, best,
//! tiebreaker, elapsed time) and does not carry the target. `synth-cli`
//! layers this file alongside the statefile so `resume` is a one-argument
//! command, the way `arvak-cli`'s `wait`/`status` commands resolve a job
//! from nothing but a job id stored under `~/.arvak/`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Everything `resume` needs besides the checkpoint file itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunMeta {
    /// Path to the target unitary's JSON file, as given to `run`.
    pub target_path: PathBuf,
    /// Name of the gate set used (currently always `"qubit"`).
    pub gateset: String,
    /// Maximum search depth, if any.
    pub depth: Option<usize>,
    /// Residual threshold.
    pub threshold: f64,
    /// Worker pool size.
    pub num_tasks: usize,
}

fn meta_path(statefile: &Path) -> PathBuf {
    let mut p = statefile.to_path_buf();
    let name = p
        .file_name()
        .map(|n| format!("{}.meta.json", n.to_string_lossy()))
        .unwrap_or_else(|| "synth.meta.json".to_string());
    p.set_file_name(name);
    p
}

impl RunMeta {
    /// Write this run's metadata next to `statefile`.
    pub fn save(&self, statefile: &Path) -> Result<()> {
        let path = meta_path(statefile);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write run metadata: {}", path.display()))?;
        Ok(())
    }

    /// Load the metadata saved alongside `statefile`.
    pub fn load(statefile: &Path) -> Result<Self> {
        let path = meta_path(statefile);
        let raw = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "no run metadata at {} — resume requires a statefile produced by `synth run`",
                path.display()
            )
        })?;
        let meta = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse run metadata: {}", path.display()))?;
        Ok(meta)
    }
}
