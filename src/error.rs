use thiserror::Error;

/// Errors that can escape the recon engine.
///
/// Per-platform transport failures and breach lookup problems are absorbed
/// into `ReconResult` data and never show up here.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error("invalid target: input is empty after trimming")]
    InvalidTarget,

    #[error("invalid platform entry {name}: {reason}")]
    InvalidPlatform { name: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ReconError>;
