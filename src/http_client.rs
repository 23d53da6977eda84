use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::config::Config;

/// Build the shared HTTP client used by platform probes and the breach client.
///
/// Per-request deadlines are applied by the callers; the client only carries
/// a connect timeout long enough for the slower of the two.
pub fn build_client(config: &Config) -> reqwest::Result<Client> {
    ClientBuilder::new()
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_nodelay(true)

        .connect_timeout(config.connect_timeout())

        // Compression
        .gzip(true)
        .brotli(true)

        .use_rustls_tls()

        // Redirects are followed; 301/302 only surface when the chain is cut off
        .redirect(reqwest::redirect::Policy::limited(10))

        .user_agent(config.user_agent.clone())
        .build()
}
