//! Target classification and dispatch.
//!
//! `ReconEngine::recon` is the single entry point: it decides from the shape
//! of the target whether to fan out over the platform registry or ask the
//! breach database, and always hands back one `ReconResult`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;

use crate::breach::BreachClient;
use crate::concurrent::ConcurrentProbe;
use crate::config::Config;
use crate::error::{ReconError, Result};
use crate::http_client::build_client;
use crate::model::{ProbeOutcome, ReconResult, TargetKind};
use crate::probe::probe;
use crate::registry::{PlatformEntry, PlatformRegistry};

/// A trimmed, classified target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    value: String,
    kind: TargetKind,
}

impl Target {
    /// Anything containing `@` is treated as an email, even when malformed.
    /// This is a routing heuristic, not address validation.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ReconError::InvalidTarget);
        }
        let kind = if value.contains('@') { TargetKind::Email } else { TargetKind::Username };
        Ok(Self { value: value.to_string(), kind })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

pub struct ReconEngine {
    client: Client,
    registry: Arc<PlatformRegistry>,
    breach: BreachClient,
    probe_timeout: Duration,
    concurrency: usize,
}

impl ReconEngine {
    /// Engine over the built-in platform registry.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_registry(config, PlatformRegistry::builtin())
    }

    pub fn with_registry(config: Config, registry: PlatformRegistry) -> Result<Self> {
        let client = build_client(&config)?;
        let breach = BreachClient::new(client.clone(), &config);
        Ok(Self {
            probe_timeout: config.probe_timeout(),
            concurrency: config.effective_concurrency(registry.len()),
            registry: Arc::new(registry),
            client,
            breach,
        })
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    pub fn breach_lookup_enabled(&self) -> bool {
        self.breach.is_enabled()
    }

    /// Run reconnaissance for `raw_target`. Only an empty target is an
    /// error; every network problem is reported inside the result.
    pub async fn recon(&self, raw_target: &str) -> Result<ReconResult> {
        let target = Target::parse(raw_target)?;
        let start = Instant::now();
        tracing::info!(recon_target = target.as_str(), kind = ?target.kind(), "starting recon");

        let result = match target.kind() {
            TargetKind::Email => {
                let lookup = self.breach.lookup_breaches(target.as_str()).await;
                ReconResult::email(target.value, lookup)
            }
            TargetKind::Username => {
                let outcomes = self.scan_username(target.as_str()).await;
                ReconResult::Username { target: target.value, outcomes }
            }
        };

        tracing::info!(
            found = result.found_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "recon finished"
        );
        Ok(result)
    }

    /// Probe every registry entry concurrently. One outcome per entry, in
    /// registry order.
    pub async fn scan_username(&self, identifier: &str) -> Vec<ProbeOutcome> {
        let exec = ConcurrentProbe::new(self.concurrency);
        let client = self.client.clone();
        let identifier: Arc<str> = Arc::from(identifier);
        let timeout = self.probe_timeout;

        let fallback_id = identifier.clone();
        let outcomes = exec
            .execute(
                self.registry.entries().to_vec(),
                move |entry: PlatformEntry| {
                    let client = client.clone();
                    let identifier = identifier.clone();
                    async move { probe(&client, &identifier, &entry, timeout).await }
                },
                |entry| ProbeOutcome {
                    platform: entry.name.clone(),
                    url: entry.render_url(&fallback_id),
                    found: false,
                    http_status: None,
                },
            )
            .await;

        let (completed, errors) = exec.stats();
        tracing::debug!(completed, errors, platforms = outcomes.len(), "username fan-out joined");
        outcomes
    }
}
