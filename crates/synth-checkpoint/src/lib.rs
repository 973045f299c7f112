//! Checkpoint bridge: atomic save/load/delete of a search driver's resumable
//! state.
//!
//! The driver itself (in `synth-search`) owns the shape of the blob it
//! checkpoints — this crate only owns the durability contract: a write
//! either lands completely or not at all, never a half-written file a crash
//! could leave behind. [`JsonCheckpointStore`] gets that guarantee the way
//! `arvak-sched`'s job store gets it for its own files, but synchronously:
//! the search driver runs one expansion cycle at a time and checkpoints
//! between cycles, so there is no concurrent writer to coordinate with.

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

pub use error::{CheckpointError, CheckpointResult};

/// A place to durably stash and retrieve a search driver's resumable state.
pub trait CheckpointStore<T> {
    /// Atomically persist `blob`, replacing any previous checkpoint.
    fn save(&self, blob: &T) -> CheckpointResult<()>;

    /// Load the last saved checkpoint, or `None` if none exists yet.
    fn load(&self) -> CheckpointResult<Option<T>>;

    /// Remove the checkpoint, if any. A synthesis run that completes
    /// successfully deletes its checkpoint so a later run does not
    /// mistakenly resume from a finished search.
    fn delete(&self) -> CheckpointResult<()>;
}

/// JSON file-backed [`CheckpointStore`]. Writes go to a sibling `.tmp` file
/// first and are moved into place with a single `rename`, so a reader never
/// observes a partially written file.
#[derive(Debug, Clone)]
pub struct JsonCheckpointStore {
    path: PathBuf,
}

impl JsonCheckpointStore {
    /// Create a store backed by the checkpoint file at `path`. The parent
    /// directory must already exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        let file_name = tmp
            .file_name()
            .map(|n| format!("{}.tmp", n.to_string_lossy()))
            .unwrap_or_else(|| "checkpoint.tmp".to_string());
        tmp.set_file_name(file_name);
        tmp
    }
}

impl<T> CheckpointStore<T> for JsonCheckpointStore
where
    T: Serialize + DeserializeOwned,
{
    #[instrument(level = "debug", skip(self, blob), fields(path = %self.path.display()))]
    fn save(&self, blob: &T) -> CheckpointResult<()> {
        let tmp_path = self.tmp_path();
        let json = serde_json::to_string_pretty(blob).map_err(|source| CheckpointError::Corrupt {
            path: tmp_path.clone(),
            source,
        })?;
        fs::write(&tmp_path, json).map_err(|source| CheckpointError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| CheckpointError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("checkpoint saved");
        Ok(())
    }

    fn load(&self) -> CheckpointResult<Option<T>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let blob = serde_json::from_str(&content).map_err(|source| CheckpointError::Corrupt {
                    path: self.path.clone(),
                    source,
                })?;
                Ok(Some(blob))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CheckpointError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn delete(&self) -> CheckpointResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CheckpointError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// True if `path`'s parent directory exists, a cheap precondition check
/// callers can run before constructing a [`JsonCheckpointStore`].
pub fn parent_dir_exists(path: &Path) -> bool {
    path.parent().is_none_or(|p| p.as_os_str().is_empty() || p.is_dir())
}
