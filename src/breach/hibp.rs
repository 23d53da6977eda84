use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::Config;
use crate::model::{BreachLookup, BreachRecord};
use crate::registry::quote_path;

pub const API_KEY_HEADER: &str = "hibp-api-key";

/// Why a lookup did not produce a breach list. Absorbed into
/// `BreachStatus` and only surfaced through logs.
#[derive(Debug, Error)]
pub enum LookupFailure {
    #[error("no breach API credential configured")]
    MissingCredential,

    #[error("breach API answered HTTP {0}")]
    UnexpectedStatus(u16),

    #[error("breach API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("breach API timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed breach API response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for a haveibeenpwned-compatible `breachedaccount` endpoint.
#[derive(Debug, Clone)]
pub struct BreachClient {
    client: Client,
    api_key: Option<String>,
    base: String,
    timeout: Duration,
}

impl BreachClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.hibp_api_key.clone(),
            base: config.breach_api_base.trim_end_matches('/').to_string(),
            timeout: config.breach_timeout(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self, email: &str) -> String {
        format!(
            "{}/api/v3/breachedaccount/{}?truncateResponse=false",
            self.base,
            quote_path(email)
        )
    }

    /// Look up breaches for `email`. Never fails; the status tells
    /// "disabled", "error" and "confirmed result" apart.
    pub async fn lookup_breaches(&self, email: &str) -> BreachLookup {
        match self.fetch(email).await {
            Ok(breaches) => {
                tracing::info!(count = breaches.len(), "breach lookup complete");
                BreachLookup::ok(breaches)
            }
            Err(LookupFailure::MissingCredential) => {
                tracing::info!("breach lookup disabled: no API key");
                BreachLookup::no_api_key()
            }
            Err(e) => {
                tracing::warn!(error = %e, "breach lookup failed");
                BreachLookup::error()
            }
        }
    }

    async fn fetch(&self, email: &str) -> Result<Vec<BreachRecord>, LookupFailure> {
        let key = self.api_key.as_deref().ok_or(LookupFailure::MissingCredential)?;
        let url = self.endpoint(email);

        // One deadline covers the request and the body read together.
        tokio::time::timeout(self.timeout, self.request(&url, key))
            .await
            .map_err(|_| LookupFailure::Timeout(self.timeout))?
    }

    async fn request(&self, url: &str, key: &str) -> Result<Vec<BreachRecord>, LookupFailure> {
        let resp = self.client.get(url).header(API_KEY_HEADER, key).send().await?;
        match resp.status() {
            StatusCode::OK => {
                let body = resp.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            other => Err(LookupFailure::UnexpectedStatus(other.as_u16())),
        }
    }
}
