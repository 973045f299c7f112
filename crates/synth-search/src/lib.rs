//! Best-first search over circuit topologies: the frontier, the driver
//! loop, checkpointing, and caller-facing configuration.

pub mod checkpoint_blob;
pub mod config;
pub mod driver;
pub mod error;
pub mod frontier;

pub use checkpoint_blob::{BestPair, CheckpointBlob, CHECKPOINT_VERSION};
pub use config::{Beams, EvalFn, HeuristicFn, SynthesisOptions};
pub use driver::{synthesize, SynthesisOutput};
pub use error::{SynthError, SynthResult};
pub use frontier::{Frontier, FrontierEntry};
