pub mod breach;
pub mod concurrent;
pub mod config;
pub mod error;
pub mod http_client;
pub mod model;
pub mod output;
pub mod probe;
pub mod recon;
pub mod registry;

pub use crate::config::Config;
pub use crate::error::{ReconError, Result};
pub use crate::model::{BreachRecord, BreachStatus, ProbeOutcome, ReconResult, TargetKind};
pub use crate::recon::{ReconEngine, Target};
pub use crate::registry::{all_platforms, PlatformEntry, PlatformRegistry};
