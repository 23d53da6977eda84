use std::time::{Duration, Instant};

use reqwest::Client;

use crate::model::ProbeOutcome;
use crate::registry::PlatformEntry;

/// Status codes taken as evidence that a profile exists. Redirects and 403
/// count because many platforms bounce or wall off real profiles.
pub const FOUND_STATUSES: [u16; 4] = [200, 301, 302, 403];

/// Presence verdict from a response status, or `None` when nothing came back.
pub fn classify(status: Option<u16>) -> bool {
    status.is_some_and(|s| FOUND_STATUSES.contains(&s))
}

/// Probe one platform for `identifier`. Never fails: transport errors and
/// timeouts come back as a negative outcome without a status.
pub async fn probe(client: &Client, identifier: &str, entry: &PlatformEntry, timeout: Duration) -> ProbeOutcome {
    let url = entry.render_url(identifier);
    let http_status = probe_url(client, &url, timeout).await;
    ProbeOutcome {
        platform: entry.name.clone(),
        found: classify(http_status),
        url,
        http_status,
    }
}

/// Single GET with a hard deadline. Dropping the request future on expiry
/// tears down its connection.
pub async fn probe_url(client: &Client, url: &str, timeout: Duration) -> Option<u16> {
    let start = Instant::now();
    let resp = tokio::time::timeout(timeout, client.get(url).send()).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match resp {
        Ok(Ok(r)) => {
            let status = r.status().as_u16();
            tracing::debug!(url, status, elapsed_ms = elapsed, "probe answered");
            Some(status)
        }
        Ok(Err(e)) => {
            tracing::debug!(url, error = %e, elapsed_ms = elapsed, "probe transport failure");
            None
        }
        Err(_) => {
            tracing::debug!(url, timeout_ms = timeout.as_millis() as u64, "probe timed out");
            None
        }
    }
}
