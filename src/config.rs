use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("TraceNet/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_BREACH_API_BASE: &str = "https://haveibeenpwned.com";

pub const ENV_API_KEY: &str = "HIBP_API_KEY";
pub const ENV_BREACH_API_BASE: &str = "TRACENET_BREACH_API_BASE";

/// Engine configuration. Handed to `ReconEngine::new`; core logic never reads
/// the environment itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub probe_timeout_secs: u64,
    pub breach_timeout_secs: u64,
    /// Max probes in flight. `None` means one slot per registry entry.
    pub concurrency: Option<usize>,
    pub hibp_api_key: Option<String>,
    pub breach_api_base: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 6,
            breach_timeout_secs: 10,
            concurrency: None,
            hibp_api_key: None,
            breach_api_base: DEFAULT_BREACH_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_json::from_str(&data)?;
        Ok(cfg)
    }

    /// Overlay `HIBP_API_KEY` and `TRACENET_BREACH_API_BASE` when set.
    pub fn apply_env(mut self) -> Self {
        self.apply_vars(|k| std::env::var(k).ok());
        self
    }

    fn apply_vars<F: Fn(&str) -> Option<String>>(&mut self, get: F) {
        if let Some(key) = get(ENV_API_KEY) {
            self.hibp_api_key = Some(key);
        }
        if let Some(base) = get(ENV_BREACH_API_BASE) {
            self.breach_api_base = base;
        }
        // An empty key is the same as no key at all.
        if self.hibp_api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.hibp_api_key = None;
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(1))
    }

    pub fn breach_timeout(&self) -> Duration {
        Duration::from_secs(self.breach_timeout_secs.max(1))
    }

    /// Connect timeout for the shared client. Probes and the breach lookup
    /// share one client, so this is the longer of the two budgets; each
    /// caller still enforces its own deadline on top.
    pub fn connect_timeout(&self) -> Duration {
        self.probe_timeout().max(self.breach_timeout())
    }

    /// Concurrency ceiling for a registry of `registry_len` entries.
    pub fn effective_concurrency(&self, registry_len: usize) -> usize {
        self.concurrency.unwrap_or(registry_len).max(1)
    }
}
